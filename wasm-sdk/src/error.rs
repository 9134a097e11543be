//! Bridge error types and their JavaScript-facing shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uniform failure shape returned to JavaScript: `{ error: string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Errors raised while servicing a bridge call.
///
/// None of these ever reach JavaScript as a thrown exception; they are
/// converted into an [`ErrorResult`] at the call boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Fewer arguments than the operation requires.
    #[error("{0}")]
    MissingArguments(&'static str),

    /// An argument was supplied with the wrong JavaScript type.
    #[error("{param} parameter must be a string, got {found}")]
    NotAString { param: &'static str, found: String },

    /// The cryptographic library failed or panicked.
    #[error("{0}")]
    Collaborator(String),
}

impl From<BridgeError> for ErrorResult {
    fn from(err: BridgeError) -> Self {
        ErrorResult::new(err.to_string())
    }
}
