//! # Prompt Defense Core
//!
//! Unified validation facade for a defense-in-depth prompt firewall.
//! Every inbound message passes through preprocessing, eight parallel
//! detectors, and a decision-fusion stage, emerging as a single
//! PASS/FLAG/BLOCK [`SecurityDecision`].
//!
//! ```rust,ignore
//! use promptguard_core::{PromptDefenseConfig, Validator};
//!
//! let validator = Validator::new(PromptDefenseConfig::default())?;
//! let decision = validator.validate("Assess whether we can automate X.", None).await;
//! match decision.action {
//!     promptguard_catalog::SecurityAction::Pass => forward(text),
//!     promptguard_catalog::SecurityAction::Flag => review(decision),
//!     promptguard_catalog::SecurityAction::Block => reject(decision),
//! }
//! ```

mod cache;
mod config;
mod decision;
mod error;
mod metrics;
mod validator;

pub use config::{DetectorConfig, GlobalConfig, PromptDefenseConfig, DETECTOR_NAMES};
pub use decision::SecurityDecision;
pub use error::{Error, Result};
pub use metrics::{AlertKind, AlertPayload, Metrics, MetricsSnapshot};
pub use validator::Validator;

// Re-export component types callers commonly need without a direct
// dependency on the lower crates.
pub use promptguard_catalog::{Category, SecurityAction, Severity};
pub use promptguard_detectors::{DetectorFinding, Sensitivity};
