//! Model error type.
//!
//! Sub-crates define their own error enums and wrap `AbmError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `abm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AbmError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter { name: String, value: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shorthand result type for all `abm-*` crates.
pub type AbmResult<T> = Result<T, AbmError>;
