// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    /// Network or HTTP-level failure for a single fetch.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No search candidate had exactly the requested title.
    #[error("Card not found: {query}")]
    CardNotFound { query: String },

    /// The card page carried a label the field table does not know.
    #[error("Unknown card field label (schema drift): {label}")]
    SchemaDrift { label: String },

    /// The search results had no usable "of N" page marker.
    #[error("Could not determine search page count")]
    PaginationParse,

    /// A decklist count that does not fit the count type.
    #[error("Line {line}: card count {count} is out of range")]
    InvalidCount { line: usize, count: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OracleError {
    pub fn transport(msg: impl Into<String>) -> Self {
        OracleError::Transport(msg.into())
    }

    /// Failures that break the extraction contract for the whole batch.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, OracleError::SchemaDrift { .. } | OracleError::PaginationParse)
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
