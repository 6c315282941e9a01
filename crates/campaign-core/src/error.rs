//! Error types module
//!
//! `CoreError` covers the failures that can happen while composing a brief or
//! an upload draft. Submission failures are not errors: they are carried in
//! [`crate::outcome::SubmissionOutcome::Failure`].

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Product index {index} out of range (brief has {len} products)")]
    ProductIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },
}
