//! Report error types

use std::path::PathBuf;

/// Errors that can occur while loading a quality report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report file could not be read
    #[error("Cannot read report {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not JSON, or a required field is missing or mistyped
    #[error("Malformed report: {source}")]
    Malformed {
        /// Source file, when the report was read from disk
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, ReportError::Malformed { .. })
    }
}
