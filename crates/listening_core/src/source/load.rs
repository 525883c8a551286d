//! File and string loaders for the analysis document.
//!
//! # Side effects
//! - Emits `document_load` logging events with duration, theme and
//!   quotation counts. Never logs document text.

use super::{LoadError, LoadResult};
use crate::model::document::Document;
use log::{error, info, warn};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// Parses a document from JSON text.
///
/// # Errors
/// - Returns `LoadError::Json` when `text` is not valid JSON syntax.
pub fn load_document_from_str(text: &str) -> LoadResult<Document> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Document::from_value(&value))
}

/// Reads and parses a document file.
///
/// # Errors
/// - Returns `LoadError::Io` when the file cannot be read.
/// - Returns `LoadError::Json` when its content is not valid JSON syntax.
pub fn load_document(path: impl AsRef<Path>) -> LoadResult<Document> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=document_load module=source status=start mode=file");

    let result = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|text| load_document_from_str(text.as_str()));

    match &result {
        Ok(document) => info!(
            "event=document_load module=source status=ok mode=file duration_ms={} themes={} quotations={}",
            started_at.elapsed().as_millis(),
            document.themes.len(),
            document.quotation_count()
        ),
        Err(err) => error!(
            "event=document_load module=source status=error mode=file duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            error_code(err),
            err
        ),
    }
    result
}

/// Reads a document file, degrading every failure to an empty document.
///
/// The empty document renders as the "no data" notice downstream.
pub fn load_document_or_empty(path: impl AsRef<Path>) -> Document {
    match load_document(path) {
        Ok(document) => document,
        Err(err) => {
            warn!(
                "event=document_fallback module=source status=degraded error_code={}",
                error_code(&err)
            );
            Document::default()
        }
    }
}

fn error_code(err: &LoadError) -> &'static str {
    match err {
        LoadError::Io { .. } => "document_read_failed",
        LoadError::Json(_) => "document_parse_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::load_document_from_str;
    use crate::source::LoadError;

    #[test]
    fn invalid_syntax_is_a_json_error() {
        let err = load_document_from_str("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn valid_but_wrong_shape_is_empty_not_error() {
        let doc = load_document_from_str("[\"a\", \"b\"]").unwrap();
        assert!(doc.is_empty());
    }
}
