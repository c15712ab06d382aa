//! Error types for archive ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an uploaded archive.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Archive file could not be opened.
    #[error("failed to open archive {path}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Zip Errors ===
    /// File is not a readable zip archive.
    #[error("failed to read zip archive {path}: {source}")]
    ZipRead {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry could not be located or decoded.
    #[error("failed to read entry '{entry}': {source}")]
    EntryRead {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry bytes could not be copied out of the archive.
    #[error("failed to extract entry '{entry}': {source}")]
    EntryExtract {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    // === Workbook Errors ===
    /// Workbook bytes are not a valid xlsx file.
    #[error("failed to open workbook: {source}")]
    WorkbookOpen {
        #[source]
        source: calamine::XlsxError,
    },

    /// Workbook has no worksheet to read from.
    #[error("workbook has no worksheets")]
    NoWorksheet,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
