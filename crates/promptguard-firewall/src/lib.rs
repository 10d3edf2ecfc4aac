//! # Semantic Firewall
//!
//! Low-level text defenses shared by the preprocessor and the data-egress
//! detector: Content Disarm & Reconstruct (CDR) sanitization, Shannon
//! entropy analysis, and canary token injection/leak-detection.
//!
//! This crate deliberately has no concept of patterns or confidence scores
//! — that lives one layer up, in `promptguard-detectors`. What lives here
//! are the primitive text operations those detectors are built from.

pub mod canary;
pub mod cdr;
pub mod entropy;
mod error;

pub use error::SanitizeError;
