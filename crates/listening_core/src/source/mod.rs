//! Document source loading.
//!
//! # Responsibility
//! - Read the analysis JSON from a file or an in-memory string.
//! - Report I/O and syntax failures with typed errors.
//!
//! # Invariants
//! - Shape problems never surface as errors; only unreadable files and
//!   invalid JSON syntax do.
//! - Callers that must not fail use `load_document_or_empty`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod load;

pub use load::{load_document, load_document_from_str, load_document_or_empty};

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug)]
pub enum LoadError {
    /// Source file cannot be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Source text is not valid JSON.
    Json(serde_json::Error),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid document JSON: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
