//! Error types for the page-source layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`SourceError`]
//! for failures of a [`PageSource`](crate::PageSource) and converts it to
//! [`TextflowError`] for the public API.

use textflow_core::TextflowError;
use thiserror::Error;

/// Error type for page-source operations.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Error reading page data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The page input is structurally invalid.
    #[error("malformed page input: {0}")]
    Malformed(String),

    /// The source has no page at this index.
    #[error("page {0} is missing from the source")]
    MissingPage(usize),

    /// Page input could not be decoded from JSON.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] TextflowError),
}

impl From<SourceError> for TextflowError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Core(e) => e,
            other => TextflowError::Source(other.to_string()),
        }
    }
}
