//! # Detector Trait
//!
//! The common interface every detector implements, mirroring the
//! evaluator-trait shape used elsewhere in this codebase for pluggable,
//! independently-testable security checks.

use promptguard_catalog::Category;

use crate::confidence::Sensitivity;
use crate::preprocessor::ProcessedInput;

/// Per-detector runtime configuration.
#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub enabled: bool,
    pub sensitivity: Sensitivity,
    pub confidence_threshold: f64,
    /// Detector-specific tuning knobs (e.g. scope validator's allowed
    /// business domains), kept untyped here so `promptguard-core`'s config
    /// schema can evolve per detector without changing this trait.
    pub custom_settings: serde_json::Value,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: Sensitivity::Medium,
            confidence_threshold: 0.5,
            custom_settings: serde_json::Value::Null,
        }
    }
}

impl DetectorSettings {
    /// Read a custom setting field as a string array, falling back to an
    /// empty vec if absent or malformed.
    pub fn string_list(&self, field: &str) -> Vec<String> {
        self.custom_settings
            .get(field)
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }

    /// Read a custom setting field as `bool`, with a default fallback.
    pub fn flag(&self, field: &str, default: bool) -> bool {
        self.custom_settings.get(field).and_then(|v| v.as_bool()).unwrap_or(default)
    }
}

/// The result of running one detector against one processed input.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DetectorFinding {
    pub detector: &'static str,
    pub category: Category,
    pub confidence: f64,
    /// `true` if `confidence >= settings.confidence_threshold`.
    pub triggered: bool,
    pub evidence: Vec<String>,
}

impl DetectorFinding {
    pub fn clean(detector: &'static str, category: Category) -> Self {
        Self { detector, category, confidence: 0.0, triggered: false, evidence: Vec::new() }
    }
}

/// A single, independently-testable security check.
pub trait Detector: Send + Sync {
    /// Stable name for logging and tie-break ordering.
    fn name(&self) -> &'static str;

    /// The attack category this detector is responsible for.
    fn category(&self) -> Category;

    /// Evaluate `input` under `settings`, producing a finding.
    fn detect(&self, input: &ProcessedInput, settings: &DetectorSettings) -> DetectorFinding;
}
