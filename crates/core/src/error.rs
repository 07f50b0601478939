//! Error types for glyphflow text unit extraction.

use thiserror::Error;

/// Failure reported by the PDF engine collaborator.
///
/// The engine is an external component; its errors are carried opaquely.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Primary error type for extraction operations.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF engine failed on page {page}: {source}")]
    Engine {
        page: usize,
        #[source]
        source: EngineError,
    },

    #[error("invalid layout parameters: {0}")]
    InvalidParams(String),

    #[error("malformed unit id: {0}")]
    InvalidUnitId(String),

    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: usize, count: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Wraps an engine failure for the given 0-based page index.
    pub fn engine(page_index: usize, source: impl Into<EngineError>) -> Self {
        Self::Engine {
            page: page_index + 1,
            source: source.into(),
        }
    }
}

/// Convenience Result type alias for ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;
