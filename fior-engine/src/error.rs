//! Common error types for the fior engine

use thiserror::Error;
use uuid::Uuid;

/// Common result type for fior operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by document mutators and serialization.
///
/// Evaluation itself never fails: a malformed or degenerate operation
/// degrades to a no-op or a non-match (see the `eval` module).
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced column does not exist in the document
    #[error("column not found: {0}")]
    ColumnNotFound(Uuid),

    /// Referenced row does not exist in the column
    #[error("row not found: {0}")]
    RowNotFound(Uuid),

    /// Flag toggle applied to a row kind that does not carry the flag
    #[error("invalid toggle: {0}")]
    InvalidToggle(&'static str),

    /// Search text is not a valid regular expression
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Document (de)serialization error (wraps serde_json::Error)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
