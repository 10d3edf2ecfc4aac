//! Shared catalog-driven detection routine.
//!
//! Most detectors are "does any pattern in my category match, and how
//! confident are we" — this is that routine, written once. Detectors with
//! genuinely bespoke structural checks (context attack, protocol
//! tampering's JSON validation) build their findings directly instead.

use promptguard_catalog::{AttackPattern, Category, PatternCatalog, SecurityAction};

use crate::confidence::pattern_confidence;
use crate::detector::DetectorFinding;
use crate::preprocessor::ProcessedInput;
use crate::DetectorSettings;

/// Maximum evidence strings retained per finding, matching the original
/// detectors' practice of limiting evidence output to the first few hits.
const MAX_EVIDENCE: usize = 5;

/// Confidence subtracted when an allow-listed (`SecurityAction::Pass`)
/// pattern also matches somewhere in the input. Patterns carrying `Pass`
/// are the catalog's allow-list mechanism: a legitimate use that happens
/// to resemble an attack (a benign multilingual business phrase, say)
/// should pull the finding back down rather than leave it unexamined.
const PASS_DISCOUNT: f64 = 0.3;

/// Score every pattern in `category` against every text view the
/// preprocessor produced — `original_text`, `normalized_text`, and each
/// recovered `decoded_content` entry — since an encoded payload that
/// decodes to a matching attack must be caught just as reliably as one
/// written in the clear. Keeps the highest confidence across all views
/// and unions evidence from every match, and lets any `Pass`-action
/// match discount the result instead of contributing to it.
pub(crate) fn catalog_driven_finding(
    detector_name: &'static str,
    category: Category,
    catalog: &PatternCatalog,
    input: &ProcessedInput,
    settings: &DetectorSettings,
    heuristic_bonus: impl Fn(&AttackPattern) -> f64,
) -> DetectorFinding {
    let views: Vec<&str> = std::iter::once(input.original_text.as_str())
        .chain(std::iter::once(input.normalized_text.as_str()))
        .chain(input.decoded_content.iter().map(String::as_str))
        .collect();

    let mut best_confidence = 0.0f64;
    let mut evidence = Vec::new();
    let mut pass_matched = false;

    for view in views {
        let text_lower = view.to_lowercase();
        for (pattern, matched_text) in catalog.matches_in_category(category, view) {
            if pattern.action == SecurityAction::Pass {
                pass_matched = true;
                if evidence.len() < MAX_EVIDENCE {
                    evidence.push(format!("{} (allow-listed): {}", pattern.id, matched_text));
                }
                continue;
            }

            let bonus = heuristic_bonus(pattern);
            let confidence = pattern_confidence(&text_lower, true, pattern, settings.sensitivity, bonus);
            best_confidence = best_confidence.max(confidence);
            if evidence.len() < MAX_EVIDENCE {
                evidence.push(format!("{}: {}", pattern.id, matched_text));
            }
        }
    }

    if pass_matched {
        best_confidence = (best_confidence - PASS_DISCOUNT).max(0.0);
    }

    let triggered = best_confidence >= settings.confidence_threshold;
    DetectorFinding { detector: detector_name, category, confidence: best_confidence, triggered, evidence }
}
