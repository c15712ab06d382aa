//! One-pass inspection of an uploaded archive.

use std::io::{Read, Seek};

use drawpack_model::{Mode, SourceEntry};
use tracing::{debug, warn};

use crate::archive::{ReadEntry, ZipSource};
use crate::discovery::{detect_top_root, find_request_pdf, find_workbook, package_id};
use crate::error::Result;
use crate::workbook::read_title;

/// What discovery found in an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    /// File name of the upload.
    pub upload_name: String,
    /// Non-directory entries in archive order.
    pub entries: Vec<SourceEntry>,
    /// Folder shared by all entries, or empty.
    pub top_root: String,
    /// Package identifier digits, or empty when unknown.
    pub id: String,
    /// Source path of the request workbook.
    pub workbook: Option<String>,
    /// Title from the workbook, or empty.
    pub title: String,
    /// Source path of the top-level request PDF.
    pub request_pdf: Option<String>,
}

impl PackageInfo {
    /// Root folder name suggested for `mode`.
    pub fn suggested_root(&self, mode: Mode) -> String {
        drawpack_core::suggest_root(mode, &self.id)
    }
}

/// Lists `source` and runs every discovery lookup.
///
/// Only listing failures are errors. A workbook that cannot be read leaves
/// the title empty.
pub fn inspect<R: Read + Seek>(source: &mut ZipSource<R>) -> Result<PackageInfo> {
    let entries = source.entries()?;
    let upload_name = source.upload_name();
    let top_root = detect_top_root(&entries);
    let id = package_id(&top_root, &upload_name);

    let workbook = find_workbook(&entries, &id).map(|entry| entry.path.clone());
    let title = match &workbook {
        Some(path) => match source.read_entry(path).and_then(|bytes| read_title(&bytes)) {
            Ok(title) => title,
            Err(error) => {
                warn!(workbook = %path, %error, "could not read workbook title");
                String::new()
            }
        },
        None => String::new(),
    };
    let request_pdf = find_request_pdf(&entries, &id).map(|entry| entry.path.clone());

    debug!(
        upload = %upload_name,
        top_root = %top_root,
        id = %id,
        workbook = ?workbook,
        title = %title,
        request_pdf = ?request_pdf,
        "inspected package"
    );

    Ok(PackageInfo {
        upload_name,
        entries,
        top_root,
        id,
        workbook,
        title,
        request_pdf,
    })
}
