//! Crate-wide error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A component string did not match its grammar.
    #[error("invalid {what}: {input:?}")]
    InvalidInput { what: &'static str, input: String },

    /// Missing header name or missing/deleted cookie.
    #[error("not found: {0}")]
    NotFound(String),

    /// Raised by body streams and transport sinks only.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(what: &'static str, input: impl Into<String>) -> Self {
        Error::InvalidInput {
            what,
            input: input.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
