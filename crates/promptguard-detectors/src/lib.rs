//! # Detectors
//!
//! The eight security detectors that inspect a preprocessed prompt, the
//! shared confidence arithmetic they all use, and the decision fusion
//! step that turns their findings into one overall action.

mod business_logic;
mod catalog_detect;
mod confidence;
mod context;
mod covert;
mod data_egress;
mod detector;
mod fusion;
mod multilingual;
mod multilingual_dictionaries;
mod overt;
mod preprocessor;
mod protocol;
mod scope;

pub use business_logic::BusinessLogicProtectorDetector;
pub use confidence::{
    false_positive_hits, indicator_ratio, pattern_confidence, phrase_ratio, ConfidenceBuilder, Sensitivity,
    FALSE_POSITIVE_PENALTY, INDICATOR_RATIO_WEIGHT, MAX_HEURISTIC_BONUS, MULTI_EVIDENCE_BONUS, PHRASE_RATIO_WEIGHT,
};
pub use context::ContextAttackDetector;
pub use covert::CovertInjectionDetector;
pub use data_egress::DataEgressDetector;
pub use detector::{Detector, DetectorFinding, DetectorSettings};
pub use fusion::{fuse, FusedDecision, FusionThresholds};
pub use multilingual::{detect_language_switching_bypass, MultilingualAttackDetector};
pub use overt::OvertInjectionDetector;
pub use preprocessor::{process, ProcessedInput};
pub use protocol::{validate_json_request, JsonValidation, ProtocolTamperingDetector};
pub use scope::ScopeValidatorDetector;
