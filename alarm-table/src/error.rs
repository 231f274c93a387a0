use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while reading a combinations table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("could not read table file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
}

impl TableError {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}
