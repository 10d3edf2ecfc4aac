//! Aggregate error type for `promptguard-core`.
//!
//! `validate` itself never returns `Err` because of user input (malformed
//! or adversarial prompts always resolve to PASS/FLAG/BLOCK); these
//! variants cover programming and host-I/O failures only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The pattern catalog ended up empty after load, including built-in
    /// seed patterns. Not recoverable.
    #[error("pattern catalog error: {0}")]
    Catalog(#[from] promptguard_catalog::CatalogError),

    /// Sanitization failed in a way the caller must know about (currently
    /// only the oversized-input case).
    #[error("sanitization error: {0}")]
    Sanitize(#[from] promptguard_firewall::SanitizeError),

    /// Time/resource budgeting failure.
    #[error("limits error: {0}")]
    Limits(#[from] promptguard_limits::LimitsError),

    /// Configuration failed validation; contains the full issue list.
    #[error("invalid configuration: {0:?}")]
    InvalidConfig(Vec<String>),

    /// I/O failure loading or saving configuration/catalog files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
