//! Archive-side collaborators for drawing packages.
//!
//! This crate reads uploaded zip archives:
//!
//! - **Listing**: every non-directory entry as a [`SourceEntry`](drawpack_model::SourceEntry)
//! - **Entry access**: the [`ReadEntry`] capability used by archive writers
//! - **Discovery**: top-level folder, package identifier, request workbook
//!   and request PDF lookups
//! - **Workbook title**: cells C4:F4 of the first worksheet
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use drawpack_ingest::{ZipSource, inspect};
//!
//! let mut source = ZipSource::open(Path::new("RFQ1234.zip"))?;
//! let info = inspect(&mut source)?;
//! println!("{} entries, title '{}'", info.entries.len(), info.title);
//! ```

mod archive;
mod discovery;
mod error;
mod package;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Archive Access ===
pub use archive::{ReadEntry, ZipSource};

// === Discovery ===
pub use discovery::{
    detect_top_root, find_request_pdf, find_workbook, package_id, suggest_root_name,
};
pub use package::{PackageInfo, inspect};

// === Workbook ===
pub use workbook::read_title;
