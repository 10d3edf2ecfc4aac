//! # Shared Confidence Arithmetic
//!
//! Every detector in this crate scores a candidate match with the same
//! nine-step arithmetic, so the arithmetic lives here once instead of being
//! duplicated per detector the way the original Python implementation had
//! it.
//!
//! Steps: start at 0 → `+0.5` for a regex match → `+` indicator-ratio
//! weighted by [`INDICATOR_RATIO_WEIGHT`] → `+` phrase-ratio weighted by
//! [`PHRASE_RATIO_WEIGHT`] → `+` a detector-specific heuristic bonus
//! (capped at [`MAX_HEURISTIC_BONUS`]) → `+` [`MULTI_EVIDENCE_BONUS`] if at
//! least two of {regex, indicators, phrases} contributed → `-`
//! [`FALSE_POSITIVE_PENALTY`] per false-positive indicator found → ×
//! sensitivity multiplier → clamp to `[0.0, 1.0]`.

use promptguard_catalog::AttackPattern;

/// Weight applied to the ratio of semantic indicators found in the text.
///
/// The original detector implementations used 0.4 consistently across
/// every detector that had this step, not the lower value a first reading
/// of the distilled specification suggested.
pub const INDICATOR_RATIO_WEIGHT: f64 = 0.4;

/// Weight applied to the ratio of description-derived key phrases found.
pub const PHRASE_RATIO_WEIGHT: f64 = 0.3;

/// Bonus applied when at least two of {regex, indicators, phrases}
/// independently contributed evidence.
pub const MULTI_EVIDENCE_BONUS: f64 = 0.2;

/// Confidence deducted per false-positive indicator found in the text.
pub const FALSE_POSITIVE_PENALTY: f64 = 0.15;

/// Ceiling applied to any single detector-specific heuristic bonus.
pub const MAX_HEURISTIC_BONUS: f64 = 0.3;

/// Sensitivity setting for a detector, scaling its final confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    Low,
    Medium,
    High,
}

impl Sensitivity {
    /// The multiplier this sensitivity level applies to raw confidence.
    pub fn multiplier(self) -> f64 {
        match self {
            Sensitivity::Low => 0.8,
            Sensitivity::Medium => 1.0,
            Sensitivity::High => 1.2,
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity::Medium
    }
}

/// Accumulates the nine-step confidence calculation for one candidate match.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfidenceBuilder {
    confidence: f64,
    regex_matched: bool,
    indicators_contributed: bool,
    phrases_contributed: bool,
}

impl ConfidenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a regex match: `+0.5`.
    pub fn regex_match(mut self) -> Self {
        self.confidence += 0.5;
        self.regex_matched = true;
        self
    }

    /// Add `ratio * INDICATOR_RATIO_WEIGHT`; counts as evidence if `ratio > 0`.
    pub fn indicator_ratio(mut self, ratio: f64) -> Self {
        self.confidence += ratio * INDICATOR_RATIO_WEIGHT;
        if ratio > 0.0 {
            self.indicators_contributed = true;
        }
        self
    }

    /// Add `ratio * PHRASE_RATIO_WEIGHT`; counts as evidence if `ratio > 0`.
    pub fn phrase_ratio(mut self, ratio: f64) -> Self {
        self.confidence += ratio * PHRASE_RATIO_WEIGHT;
        if ratio > 0.0 {
            self.phrases_contributed = true;
        }
        self
    }

    /// Add a detector-specific bonus, capped at `MAX_HEURISTIC_BONUS`.
    pub fn heuristic_bonus(mut self, bonus: f64) -> Self {
        self.confidence += bonus.min(MAX_HEURISTIC_BONUS).max(0.0);
        self
    }

    /// Subtract `FALSE_POSITIVE_PENALTY` for each false-positive hit.
    pub fn false_positive_penalty(mut self, hits: usize) -> Self {
        self.confidence -= FALSE_POSITIVE_PENALTY * hits as f64;
        self
    }

    /// Apply the multi-evidence bonus, the sensitivity multiplier, and clamp.
    pub fn finish(self, sensitivity: Sensitivity) -> f64 {
        let evidence_count = [self.regex_matched, self.indicators_contributed, self.phrases_contributed]
            .iter()
            .filter(|&&present| present)
            .count();

        let mut confidence = self.confidence;
        if evidence_count >= 2 {
            confidence += MULTI_EVIDENCE_BONUS;
        }
        (confidence * sensitivity.multiplier()).clamp(0.0, 1.0)
    }
}

/// Ratio of `indicators` present (case-insensitively) in `text_lower`.
///
/// `text_lower` must already be lowercased by the caller; callers compute
/// it once per detector invocation rather than per pattern.
pub fn indicator_ratio(text_lower: &str, indicators: &[String]) -> f64 {
    if indicators.is_empty() {
        return 0.0;
    }
    let hits = indicators.iter().filter(|i| text_lower.contains(i.to_lowercase().as_str())).count();
    hits as f64 / indicators.len() as f64
}

/// Ratio of description-derived bigrams present in `text_lower`.
///
/// Mines candidate phrases directly from a pattern's own description
/// instead of maintaining a second, hand-written phrase list per pattern.
pub fn phrase_ratio(text_lower: &str, description: &str) -> f64 {
    let words: Vec<String> = description.split_whitespace().map(|w| w.to_lowercase()).collect();
    if words.len() < 2 {
        return 0.0;
    }
    let bigrams: Vec<String> = words.windows(2).map(|w| format!("{} {}", w[0], w[1])).collect();
    let hits = bigrams.iter().filter(|b| text_lower.contains(b.as_str())).count();
    hits as f64 / bigrams.len() as f64
}

/// Count of false-positive indicators present in `text_lower`.
pub fn false_positive_hits(text_lower: &str, fp_indicators: &[String]) -> usize {
    fp_indicators.iter().filter(|i| text_lower.contains(i.to_lowercase().as_str())).count()
}

/// Run the full nine-step calculation for one pattern against `text_lower`,
/// given whether its regex matched and any detector-specific heuristic
/// bonus already computed by the caller.
pub fn pattern_confidence(
    text_lower: &str,
    matched: bool,
    pattern: &AttackPattern,
    sensitivity: Sensitivity,
    heuristic_bonus: f64,
) -> f64 {
    let fp_hits = false_positive_hits(text_lower, &pattern.false_positive_indicators);

    let mut builder = ConfidenceBuilder::new();
    if matched {
        builder = builder.regex_match();
    }
    builder = builder
        .indicator_ratio(indicator_ratio(text_lower, &pattern.semantic_indicators))
        .phrase_ratio(phrase_ratio(text_lower, &pattern.description))
        .heuristic_bonus(heuristic_bonus)
        .false_positive_penalty(fp_hits);

    builder.finish(sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_only_match_yields_half_confidence_at_medium_sensitivity() {
        let confidence = ConfidenceBuilder::new().regex_match().finish(Sensitivity::Medium);
        assert!((confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn multi_evidence_bonus_requires_two_sources() {
        let one_source = ConfidenceBuilder::new().regex_match().finish(Sensitivity::Medium);
        let two_sources = ConfidenceBuilder::new()
            .regex_match()
            .indicator_ratio(1.0)
            .finish(Sensitivity::Medium);
        assert!(two_sources > one_source + INDICATOR_RATIO_WEIGHT - 1e-9);
    }

    #[test]
    fn false_positive_penalty_reduces_confidence() {
        let clean = ConfidenceBuilder::new().regex_match().finish(Sensitivity::Medium);
        let penalized = ConfidenceBuilder::new().regex_match().false_positive_penalty(1).finish(Sensitivity::Medium);
        assert!(penalized < clean);
    }

    #[test]
    fn sensitivity_scales_final_score() {
        let low = ConfidenceBuilder::new().regex_match().finish(Sensitivity::Low);
        let high = ConfidenceBuilder::new().regex_match().finish(Sensitivity::High);
        assert!(low < high);
    }

    #[test]
    fn confidence_is_always_clamped() {
        let confidence = ConfidenceBuilder::new()
            .regex_match()
            .indicator_ratio(1.0)
            .phrase_ratio(1.0)
            .heuristic_bonus(1.0)
            .finish(Sensitivity::High);
        assert!(confidence <= 1.0);
    }

    #[test]
    fn phrase_ratio_mines_bigrams_from_description() {
        let ratio = phrase_ratio("please extract the system prompt now", "extract the system prompt");
        assert!(ratio > 0.0);
    }
}
