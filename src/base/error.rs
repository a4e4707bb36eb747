//! Error types for analysis entry points.
//!
//! "Not found" is never an error: resolution returns `Option`, inference
//! returns `Ty::Unknown`. These variants cover invalid input only.

use std::path::PathBuf;

use thiserror::Error;

use super::uri::FileUri;
use crate::syntax::Generation;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The file was never opened or has been closed.
    #[error("unknown file: {0}")]
    UnknownFile(FileUri),

    /// A node from a replaced tree was used after its file was reparsed.
    #[error("stale node: tree generation {found} used, current is {expected}")]
    StaleNode {
        expected: Generation,
        found: Generation,
    },

    /// Cursor position outside the file text.
    #[error("position {line}:{column} is out of range")]
    PositionOutOfRange { line: usize, column: usize },

    /// IO error while reading a source file.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rename target is not a valid identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
