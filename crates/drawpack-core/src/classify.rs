//! Per-file classification into manifest items.

use drawpack_model::{ClassificationOptions, ItemKind, ManifestItem, SourceEntry};
use tracing::trace;

use crate::path;
use crate::structure;

/// Folder receiving unclassified files when the fallback is enabled.
pub const ATTACHMENTS_FOLDER: &str = "attachments";

/// File names created by operating systems rather than users.
const JUNK_FILE_NAMES: &[&str] = &[".ds_store", "thumbs.db", "desktop.ini", "ehthumbs.db"];

/// Directory names created by archivers rather than users.
const JUNK_DIRECTORIES: &[&str] = &["__macosx"];

/// Why a source entry was left out of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exclusion {
    /// Operating-system metadata or an empty file name.
    Junk,
    /// No part-number folder directly followed by a drawing folder.
    NoStructure,
    /// Extension not on the mode's allow-list.
    Extension,
}

impl Exclusion {
    pub fn label(self) -> &'static str {
        match self {
            Self::Junk => "system file",
            Self::NoStructure => "no PN/DRW folders",
            Self::Extension => "extension not allowed",
        }
    }
}

/// Classifies one entry; `None` means the entry is excluded.
pub fn classify(entry: &SourceEntry, options: &ClassificationOptions) -> Option<ManifestItem> {
    classify_detailed(entry, options).ok()
}

/// Classifies one entry, reporting the reason for an exclusion.
///
/// Never panics on malformed paths: anything unrecognizable degrades to an
/// exclusion or to the attachments fallback.
pub fn classify_detailed(
    entry: &SourceEntry,
    options: &ClassificationOptions,
) -> Result<ManifestItem, Exclusion> {
    let parts = path::split(&entry.path);
    if is_junk(&parts.segments, &parts.file_name) {
        trace!(source_path = %entry.path, "skipping system file");
        return Err(Exclusion::Junk);
    }

    let segments: Vec<&str> = parts
        .segments
        .iter()
        .map(String::as_str)
        .filter(|segment| !options.strips(segment))
        .collect();
    let extension = path::extension(&parts.file_name);

    let Some(found) = structure::locate(&segments) else {
        trace!(source_path = %entry.path, "no part-number/drawing-folder pair");
        return fallback(entry, &parts.file_name, extension, options, Exclusion::NoStructure);
    };

    if !options.mode.allows_extension(&extension) {
        trace!(
            source_path = %entry.path,
            extension = %extension,
            mode = %options.mode,
            "extension not allowed"
        );
        return fallback(entry, &parts.file_name, extension, options, Exclusion::Extension);
    }

    let part_number = segments[found.part_index];
    let drawing_folder = segments[found.drawing_index];
    let mut dest_parts: Vec<&str> = Vec::with_capacity(segments.len() + 2);
    dest_parts.push(&options.root);
    dest_parts.extend_from_slice(&segments[found.part_index..]);
    dest_parts.push(&parts.file_name);

    Ok(ManifestItem {
        source_path: entry.path.clone(),
        dest_path: path::join(&dest_parts),
        part_number: part_number.to_string(),
        drawing_folder: drawing_folder.to_string(),
        file_name: parts.file_name.clone(),
        extension,
        kind: ItemKind::Drawing,
    })
}

fn fallback(
    entry: &SourceEntry,
    file_name: &str,
    extension: String,
    options: &ClassificationOptions,
    reason: Exclusion,
) -> Result<ManifestItem, Exclusion> {
    if !options.include_unclassified {
        return Err(reason);
    }
    Ok(ManifestItem {
        source_path: entry.path.clone(),
        dest_path: path::join(&[options.root.as_str(), ATTACHMENTS_FOLDER, file_name]),
        part_number: String::new(),
        drawing_folder: String::new(),
        file_name: file_name.to_string(),
        extension,
        kind: ItemKind::Attachment,
    })
}

fn is_junk(segments: &[String], file_name: &str) -> bool {
    if file_name.is_empty() || file_name.starts_with("._") {
        return true;
    }
    let lower = file_name.to_lowercase();
    if JUNK_FILE_NAMES.contains(&lower.as_str()) {
        return true;
    }
    segments
        .iter()
        .any(|segment| JUNK_DIRECTORIES.contains(&segment.to_lowercase().as_str()))
}
