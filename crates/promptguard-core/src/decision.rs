//! The final, user- and operator-facing output of one validation.

use promptguard_catalog::SecurityAction;
use promptguard_detectors::DetectorFinding;
use serde::{Deserialize, Serialize};

/// The outcome of validating a single prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityDecision {
    pub action: SecurityAction,
    pub confidence: f64,
    /// Deduplicated pattern/heuristic ids behind the decision, in
    /// discovery order.
    pub detected_attacks: Vec<String>,
    /// Safe to display to the end user; never echoes raw input.
    pub user_message: String,
    /// Present only when `action = Flag` and the input was judged safe to
    /// forward with neutralizations applied.
    pub sanitized_input: Option<String>,
    /// Full per-detector findings, for operator audit. Never shown to
    /// end users directly.
    pub technical_details: Vec<DetectorFinding>,
}

impl SecurityDecision {
    pub fn pass() -> Self {
        Self {
            action: SecurityAction::Pass,
            confidence: 0.0,
            detected_attacks: Vec::new(),
            user_message: String::new(),
            sanitized_input: None,
            technical_details: Vec::new(),
        }
    }
}

/// Build the user-facing message for a decision. Never includes the
/// user's own text — only a neutral description of the outcome.
pub fn build_user_message(action: SecurityAction, dominant_category: Option<&str>) -> String {
    match action {
        SecurityAction::Pass => String::new(),
        SecurityAction::Flag => {
            "Your request could not be processed as written. Please rephrase it as a direct business-automation feasibility question.".to_string()
        }
        SecurityAction::Block => match dominant_category {
            Some(category) => format!(
                "This request was blocked for security reasons (category: {}). See help:security-policy for details.",
                category
            ),
            None => "This request was blocked for security reasons. See help:security-policy for details.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_message_is_empty() {
        assert!(build_user_message(SecurityAction::Pass, None).is_empty());
    }

    #[test]
    fn block_message_names_category_but_not_input() {
        let message = build_user_message(SecurityAction::Block, Some("overt_injection"));
        assert!(message.contains("overt_injection"));
    }
}
