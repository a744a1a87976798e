//! Error types for textflow.
//!
//! Provides [`TextflowError`] for conditions the caller has to act on.
//! Continuity rejections during run assembly are not errors; see
//! [`Rejection`](crate::element::Rejection).

use std::fmt;

/// Fatal error types for text-flow reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub enum TextflowError {
    /// A tuning option holds a value the algorithms cannot work with.
    InvalidOption {
        /// Dotted option path (e.g., "assembler.baseline_epsilon").
        name: String,
        /// The offending value, rendered for display.
        value: String,
    },
    /// A page index past the end of the document was requested.
    PageOutOfRange {
        /// The requested 0-based page index.
        index: usize,
        /// Number of pages available.
        count: usize,
    },
    /// The page collaborator failed to supply its input.
    Source(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for TextflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextflowError::InvalidOption { name, value } => {
                write!(f, "invalid option: {name} = {value}")
            }
            TextflowError::PageOutOfRange { index, count } => {
                write!(f, "page index {index} out of range (0..{count})")
            }
            TextflowError::Source(msg) => write!(f, "page source error: {msg}"),
            TextflowError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TextflowError {}

impl TextflowError {
    pub(crate) fn invalid_option(name: &str, value: impl fmt::Display) -> Self {
        TextflowError::InvalidOption {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
