//! Core error type.
//!
//! Sub-crates define their own error enums; this one covers input parsing and
//! configuration validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid severity code {0} (expected 1-4)")]
    InvalidSeverity(u8),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `er-core`.
pub type CoreResult<T> = Result<T, CoreError>;
