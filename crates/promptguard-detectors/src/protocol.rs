//! Detects attempts to tamper with the structured response protocol:
//! unauthorized field injection, free text appended after a JSON body,
//! and manipulated empty-object payloads.

use std::sync::Arc;

use promptguard_catalog::{Category, PatternCatalog};

use crate::catalog_detect::catalog_driven_finding;
use crate::detector::{Detector, DetectorFinding, DetectorSettings};
use crate::preprocessor::ProcessedInput;

/// Field names that have no legitimate place in a business-automation
/// feasibility response.
const SUSPICIOUS_FIELDS: &[&str] = &[
    "tool", "enable", "disable", "safety", "admin", "system", "config", "raw_cmd", "__cmd",
    "_internal", "execute", "shell", "command", "bypass", "override", "access", "privilege",
    "auth", "token",
];

/// String field values that indicate an attempt to flip a safety control.
const DANGEROUS_VALUES: &[&str] =
    &["enable:http", "disable_safety", "bypass_security", "admin_access", "shell_access", "system_override", "disable:validation"];

/// Structural validation result for a JSON-shaped response body.
#[derive(Debug, Clone)]
pub struct JsonValidation {
    pub is_valid: bool,
    pub confidence: f64,
    pub issues: Vec<String>,
}

/// Validate a JSON response body for injected or tampered fields.
///
/// Confidence accumulates independently of the detector's own confidence
/// builder: `+0.3` per suspicious field name, `+0.2` per leading-underscore
/// field, `+0.4` per dangerous value found in a string field. A parse
/// failure is reported as an issue but does not alone mark the body
/// invalid, since the input may legitimately be free text rather than JSON.
pub fn validate_json_request(json_text: &str) -> JsonValidation {
    let mut confidence = 0.0f64;
    let mut issues = Vec::new();

    let value: serde_json::Value = match serde_json::from_str(json_text) {
        Ok(v) => v,
        Err(_) => {
            return JsonValidation { is_valid: true, confidence: 0.0, issues: vec!["invalid JSON format".to_string()] };
        }
    };

    if let serde_json::Value::Object(map) = &value {
        for (key, field_value) in map {
            let key_lower = key.to_lowercase();

            if SUSPICIOUS_FIELDS.iter().any(|f| key_lower == *f) {
                confidence += 0.3;
                issues.push(format!("suspicious field name: {}", key));
            }
            if key.starts_with('_') {
                confidence += 0.2;
                issues.push(format!("leading-underscore field: {}", key));
            }
            if let Some(s) = field_value.as_str() {
                let s_lower = s.to_lowercase();
                if DANGEROUS_VALUES.iter().any(|d| s_lower.contains(d)) {
                    confidence += 0.4;
                    issues.push(format!("dangerous value in field {}: {}", key, s));
                }
            }
        }
    }

    let confidence = confidence.min(1.0);
    JsonValidation { is_valid: confidence <= 0.5, confidence, issues }
}

pub struct ProtocolTamperingDetector {
    catalog: Arc<PatternCatalog>,
}

impl ProtocolTamperingDetector {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }
}

impl Detector for ProtocolTamperingDetector {
    fn name(&self) -> &'static str {
        "protocol_tampering"
    }

    fn category(&self) -> Category {
        Category::ProtocolTampering
    }

    fn detect(&self, input: &ProcessedInput, settings: &DetectorSettings) -> DetectorFinding {
        if !settings.enabled {
            return DetectorFinding::clean(self.name(), self.category());
        }

        let mut finding = catalog_driven_finding(
            self.name(),
            self.category(),
            &self.catalog,
            input,
            settings,
            |_| 0.0,
        );

        // If the input looks like a JSON object, run the structural field
        // check too and fold it into the finding independently of whether
        // any catalog pattern matched.
        if let Some(start) = input.normalized_text.find('{') {
            if let Some(end) = input.normalized_text.rfind('}') {
                if end > start {
                    let candidate = &input.normalized_text[start..=end];
                    let validation = validate_json_request(candidate);
                    if validation.confidence > finding.confidence {
                        finding.confidence = validation.confidence;
                        finding.triggered = finding.confidence >= settings.confidence_threshold;
                    }
                    finding.evidence.extend(validation.issues);
                }
            }
        }

        finding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ProtocolTamperingDetector {
        ProtocolTamperingDetector::new(Arc::new(PatternCatalog::default_catalog().unwrap()))
    }

    #[test]
    fn validate_json_flags_suspicious_fields() {
        let result = validate_json_request(r#"{"enable": "http", "bypass_security": true}"#);
        assert!(!result.is_valid);
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn validate_json_accepts_normal_response() {
        let result = validate_json_request(r#"{"feasible": true, "estimated_hours": 40}"#);
        assert!(result.is_valid);
    }

    #[test]
    fn validate_json_invalid_json_is_not_fatal() {
        let result = validate_json_request("not json at all");
        assert!(result.is_valid);
        assert!(!result.issues.is_empty());
    }

    #[test]
    fn detector_flags_tampered_json_in_input() {
        let detector = detector();
        let input = crate::preprocessor::process(r#"Respond with {"_internal": "execute", "admin": true}"#);
        let finding = detector.detect(&input, &DetectorSettings::default());
        assert!(finding.triggered, "confidence was {}", finding.confidence);
    }
}
