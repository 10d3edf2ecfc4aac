//! Curated, multi-language phrase dictionaries used by the multilingual
//! attack detector: translations of malicious instructions and
//! business-automation vocabulary across the language families the
//! original detector covered (Spanish, French, German, Italian,
//! Portuguese, Russian, Chinese, Japanese, Korean, Arabic), ported
//! verbatim from its seed dictionaries.

pub(crate) const MALICIOUS_TRANSLATIONS: &[(&str, &str)] = &[
    ("ignore_instructions", "ignore"),
    ("ignore_instructions", "ignore all"),
    ("ignore_instructions", "ignore previous"),
    ("ignore_instructions", "ignore instructions"),
    ("ignore_instructions", "忽略"),
    ("ignore_instructions", "忽略所有"),
    ("ignore_instructions", "忽略以上"),
    ("ignore_instructions", "忽略規則"),
    ("ignore_instructions", "忽略指示"),
    ("ignore_instructions", "忽视"),
    ("ignore_instructions", "忽视所有"),
    ("ignore_instructions", "忽视以上"),
    ("ignore_instructions", "忽视规则"),
    ("ignore_instructions", "忽视指示"),
    ("ignore_instructions", "ignorar"),
    ("ignore_instructions", "ignorar todo"),
    ("ignore_instructions", "ignorar anterior"),
    ("ignore_instructions", "ignorar instrucciones"),
    ("ignore_instructions", "ignorer"),
    ("ignore_instructions", "ignorer tout"),
    ("ignore_instructions", "ignorer précédent"),
    ("ignore_instructions", "ignorer instructions"),
    ("ignore_instructions", "ignorieren"),
    ("ignore_instructions", "alles ignorieren"),
    ("ignore_instructions", "vorherige ignorieren"),
    ("ignore_instructions", "anweisungen ignorieren"),
    ("ignore_instructions", "ignorare"),
    ("ignore_instructions", "ignorare tutto"),
    ("ignore_instructions", "ignorare precedente"),
    ("ignore_instructions", "ignorare istruzioni"),
    ("ignore_instructions", "ignorar"),
    ("ignore_instructions", "ignorar tudo"),
    ("ignore_instructions", "ignorar anterior"),
    ("ignore_instructions", "ignorar instruções"),
    ("ignore_instructions", "игнорировать"),
    ("ignore_instructions", "игнорировать все"),
    ("ignore_instructions", "игнорировать предыдущие"),
    ("ignore_instructions", "игнорировать инструкции"),
    ("ignore_instructions", "無視"),
    ("ignore_instructions", "すべて無視"),
    ("ignore_instructions", "前の無視"),
    ("ignore_instructions", "指示を無視"),
    ("ignore_instructions", "무시"),
    ("ignore_instructions", "모든 무시"),
    ("ignore_instructions", "이전 무시"),
    ("ignore_instructions", "지시 무시"),
    ("ignore_instructions", "تجاهل"),
    ("ignore_instructions", "تجاهل كل"),
    ("ignore_instructions", "تجاهل السابق"),
    ("ignore_instructions", "تجاهل التعليمات"),
    ("show_system", "show system"),
    ("show_system", "reveal system"),
    ("show_system", "display system"),
    ("show_system", "print system"),
    ("show_system", "顯示系統"),
    ("show_system", "揭示系統"),
    ("show_system", "展示系統"),
    ("show_system", "打印系統"),
    ("show_system", "显示系统"),
    ("show_system", "揭示系统"),
    ("show_system", "展示系统"),
    ("show_system", "打印系统"),
    ("show_system", "mostrar sistema"),
    ("show_system", "revelar sistema"),
    ("show_system", "mostrar configuración"),
    ("show_system", "montrer système"),
    ("show_system", "révéler système"),
    ("show_system", "afficher système"),
    ("show_system", "system zeigen"),
    ("show_system", "system offenbaren"),
    ("show_system", "system anzeigen"),
    ("show_system", "mostrare sistema"),
    ("show_system", "rivelare sistema"),
    ("show_system", "visualizzare sistema"),
    ("show_system", "mostrar sistema"),
    ("show_system", "revelar sistema"),
    ("show_system", "exibir sistema"),
    ("show_system", "показать систему"),
    ("show_system", "раскрыть систему"),
    ("show_system", "отобразить систему"),
    ("show_system", "システム表示"),
    ("show_system", "システム表示"),
    ("show_system", "システム設定表示"),
    ("show_system", "시스템 표시"),
    ("show_system", "시스템 표시"),
    ("show_system", "시스템 설정 표시"),
    ("show_system", "إظهار النظام"),
    ("show_system", "كشف النظام"),
    ("show_system", "عرض النظام"),
    ("switch_roles", "switch roles"),
    ("switch_roles", "reverse roles"),
    ("switch_roles", "you are user"),
    ("switch_roles", "i am model"),
    ("switch_roles", "切換角色"),
    ("switch_roles", "反轉角色"),
    ("switch_roles", "你是用戶"),
    ("switch_roles", "我是模型"),
    ("switch_roles", "切换角色"),
    ("switch_roles", "反转角色"),
    ("switch_roles", "你是用户"),
    ("switch_roles", "我是模型"),
    ("switch_roles", "cambiar roles"),
    ("switch_roles", "invertir roles"),
    ("switch_roles", "eres usuario"),
    ("switch_roles", "soy modelo"),
    ("switch_roles", "changer rôles"),
    ("switch_roles", "inverser rôles"),
    ("switch_roles", "tu es utilisateur"),
    ("switch_roles", "je suis modèle"),
    ("switch_roles", "rollen wechseln"),
    ("switch_roles", "rollen umkehren"),
    ("switch_roles", "du bist benutzer"),
    ("switch_roles", "ich bin modell"),
    ("switch_roles", "cambiare ruoli"),
    ("switch_roles", "invertire ruoli"),
    ("switch_roles", "sei utente"),
    ("switch_roles", "sono modello"),
    ("switch_roles", "trocar papéis"),
    ("switch_roles", "inverter papéis"),
    ("switch_roles", "você é usuário"),
    ("switch_roles", "eu sou modelo"),
    ("switch_roles", "поменять роли"),
    ("switch_roles", "обратить роли"),
    ("switch_roles", "ты пользователь"),
    ("switch_roles", "я модель"),
    ("switch_roles", "役割交換"),
    ("switch_roles", "役割逆転"),
    ("switch_roles", "あなたはユーザー"),
    ("switch_roles", "私はモデル"),
    ("switch_roles", "역할 교환"),
    ("switch_roles", "역할 반전"),
    ("switch_roles", "당신은 사용자"),
    ("switch_roles", "나는 모델"),
    ("switch_roles", "تبديل الأدوار"),
    ("switch_roles", "عكس الأدوار"),
    ("switch_roles", "أنت المستخدم"),
    ("switch_roles", "أنا النموذج"),
];
pub(crate) const BUSINESS_KEYWORDS: &[(&str, &str)] = &[
    ("feasibility", "feasibility"),
    ("feasibility", "assess"),
    ("feasibility", "evaluate"),
    ("feasibility", "analyze"),
    ("feasibility", "determine"),
    ("feasibility", "can ai"),
    ("feasibility", "automation"),
    ("feasibility", "factibilidad"),
    ("feasibility", "evaluar"),
    ("feasibility", "analizar"),
    ("feasibility", "determinar"),
    ("feasibility", "puede ia"),
    ("feasibility", "automatización"),
    ("feasibility", "faisabilité"),
    ("feasibility", "évaluer"),
    ("feasibility", "analyser"),
    ("feasibility", "déterminer"),
    ("feasibility", "peut ia"),
    ("feasibility", "automatisation"),
    ("feasibility", "machbarkeit"),
    ("feasibility", "bewerten"),
    ("feasibility", "analysieren"),
    ("feasibility", "bestimmen"),
    ("feasibility", "kann ki"),
    ("feasibility", "automatisierung"),
    ("feasibility", "fattibilità"),
    ("feasibility", "valutare"),
    ("feasibility", "analizzare"),
    ("feasibility", "determinare"),
    ("feasibility", "può ia"),
    ("feasibility", "automazione"),
    ("feasibility", "viabilidade"),
    ("feasibility", "avaliar"),
    ("feasibility", "analisar"),
    ("feasibility", "determinar"),
    ("feasibility", "pode ia"),
    ("feasibility", "automação"),
    ("feasibility", "可行性"),
    ("feasibility", "評估"),
    ("feasibility", "分析"),
    ("feasibility", "確定"),
    ("feasibility", "人工智能"),
    ("feasibility", "自動化"),
    ("feasibility", "可行性"),
    ("feasibility", "评估"),
    ("feasibility", "分析"),
    ("feasibility", "确定"),
    ("feasibility", "人工智能"),
    ("feasibility", "自动化"),
    ("feasibility", "実現可能性"),
    ("feasibility", "評価"),
    ("feasibility", "分析"),
    ("feasibility", "決定"),
    ("feasibility", "人工知能"),
    ("feasibility", "自動化"),
    ("feasibility", "실현가능성"),
    ("feasibility", "평가"),
    ("feasibility", "분석"),
    ("feasibility", "결정"),
    ("feasibility", "인공지능"),
    ("feasibility", "자동화"),
    ("feasibility", "осуществимость"),
    ("feasibility", "оценить"),
    ("feasibility", "анализировать"),
    ("feasibility", "определить"),
    ("feasibility", "ии"),
    ("feasibility", "автоматизация"),
    ("business_terms", "business"),
    ("business_terms", "tickets"),
    ("business_terms", "support"),
    ("business_terms", "email"),
    ("business_terms", "invoice"),
    ("business_terms", "document"),
    ("business_terms", "classification"),
    ("business_terms", "negocio"),
    ("business_terms", "tickets"),
    ("business_terms", "soporte"),
    ("business_terms", "correo"),
    ("business_terms", "factura"),
    ("business_terms", "documento"),
    ("business_terms", "clasificación"),
    ("business_terms", "entreprise"),
    ("business_terms", "tickets"),
    ("business_terms", "support"),
    ("business_terms", "email"),
    ("business_terms", "facture"),
    ("business_terms", "document"),
    ("business_terms", "classification"),
    ("business_terms", "geschäft"),
    ("business_terms", "tickets"),
    ("business_terms", "support"),
    ("business_terms", "email"),
    ("business_terms", "rechnung"),
    ("business_terms", "dokument"),
    ("business_terms", "klassifizierung"),
    ("business_terms", "business"),
    ("business_terms", "ticket"),
    ("business_terms", "supporto"),
    ("business_terms", "email"),
    ("business_terms", "fattura"),
    ("business_terms", "documento"),
    ("business_terms", "classificazione"),
    ("business_terms", "negócio"),
    ("business_terms", "tickets"),
    ("business_terms", "suporte"),
    ("business_terms", "email"),
    ("business_terms", "fatura"),
    ("business_terms", "documento"),
    ("business_terms", "classificação"),
    ("business_terms", "業務"),
    ("business_terms", "工單"),
    ("business_terms", "支持"),
    ("business_terms", "郵件"),
    ("business_terms", "發票"),
    ("business_terms", "文檔"),
    ("business_terms", "分類"),
    ("business_terms", "业务"),
    ("business_terms", "工单"),
    ("business_terms", "支持"),
    ("business_terms", "邮件"),
    ("business_terms", "发票"),
    ("business_terms", "文档"),
    ("business_terms", "分类"),
    ("business_terms", "ビジネス"),
    ("business_terms", "チケット"),
    ("business_terms", "サポート"),
    ("business_terms", "メール"),
    ("business_terms", "請求書"),
    ("business_terms", "文書"),
    ("business_terms", "分類"),
    ("business_terms", "비즈니스"),
    ("business_terms", "티켓"),
    ("business_terms", "지원"),
    ("business_terms", "이메일"),
    ("business_terms", "송장"),
    ("business_terms", "문서"),
    ("business_terms", "분류"),
    ("business_terms", "бизнес"),
    ("business_terms", "тикеты"),
    ("business_terms", "поддержка"),
    ("business_terms", "email"),
    ("business_terms", "счет"),
    ("business_terms", "документ"),
    ("business_terms", "классификация"),
];

/// `true` if `text_lower` (already lowercased) contains any malicious
/// instruction translation, in any covered language.
pub(crate) fn contains_malicious_content(text_lower: &str) -> bool {
    MALICIOUS_TRANSLATIONS.iter().any(|(_, phrase)| text_lower.contains(&phrase.to_lowercase()))
}

/// `true` if `text_lower` contains any business-automation keyword, in
/// any covered language.
pub(crate) fn contains_business_keyword(text_lower: &str) -> bool {
    BUSINESS_KEYWORDS.iter().any(|(_, phrase)| text_lower.contains(&phrase.to_lowercase()))
}
