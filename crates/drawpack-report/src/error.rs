//! Error types for report and archive output.

use std::path::PathBuf;
use thiserror::Error;

use drawpack_ingest::IngestError;

/// Errors that can occur while writing package outputs.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Source bytes could not be fetched from the upload.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// An archive entry could not be started or finished.
    #[error("failed to write archive entry '{entry}': {source}")]
    ArchiveEntry {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry bytes could not be written into the archive.
    #[error("failed to write archive data for '{entry}': {source}")]
    ArchiveData {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    /// Report rows could not be serialized as CSV.
    #[error("failed to write CSV report '{name}': {source}")]
    Csv {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// Request mail message could not be assembled.
    #[error("failed to build mail message '{name}': {source}")]
    Eml {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be serialized as JSON.
    #[error("failed to serialize manifest: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// Output file could not be written.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, ReportError>;
