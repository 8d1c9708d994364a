//! Error types returned by the transform engine.

use thiserror::Error;

/// Errors raised by [`crate::apply`] and the typed transform path.
///
/// Out-of-range numeric parameters are clamped, never reported; only
/// structurally wrong input reaches the caller as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No image was supplied, or the image violates its shape invariants.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parameter is unknown, of the wrong kind, or carries an unrecognized
    /// enumerated value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl EngineError {
    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
