//! Package discovery over a listed archive.
//!
//! Uploads are loosely structured: a single wrapper folder, a request
//! workbook named after the package, and a top-level request PDF. The
//! lookups here are heuristics; every one of them may find nothing.

use drawpack_core::{first_id_candidate, path, suggest_root};
use drawpack_model::{Mode, SourceEntry};

/// Returns the folder shared by every entry as its first segment.
///
/// Empty when entries disagree, when there are no entries, or when the
/// shared segment looks like a file name (`.<alnum>` suffix).
pub fn detect_top_root(entries: &[SourceEntry]) -> String {
    let mut firsts = entries.iter().map(|entry| path::first_segment(&entry.path));
    let Some(first) = firsts.next() else {
        return String::new();
    };
    if firsts.any(|segment| segment != first) || looks_like_file_name(&first) {
        return String::new();
    }
    first
}

/// Package identifier from the detected root, else from the upload name.
pub fn package_id(top_root: &str, upload_name: &str) -> String {
    first_id_candidate(&[top_root, upload_name])
}

/// Default root folder name for the output package.
pub fn suggest_root_name(mode: Mode, top_root: &str, upload_name: &str) -> String {
    suggest_root(mode, &package_id(top_root, upload_name))
}

/// Locates the request workbook.
///
/// Tried in order: `<id>/<id>.xlsx`; a workbook named after its own
/// `RFQ…`/`PO…` folder, optionally one level down; the best-ranked `.xlsx`
/// in any folder.
pub fn find_workbook<'a>(entries: &'a [SourceEntry], id: &str) -> Option<&'a SourceEntry> {
    if let Some(found) = find_exact(entries, id, "xlsx") {
        return Some(found);
    }
    if let Some(found) = entries
        .iter()
        .find(|entry| is_named_after_tagged_folder(&path::normalize(&entry.path)))
    {
        return Some(found);
    }

    let mut candidates: Vec<(i32, usize, &SourceEntry)> = entries
        .iter()
        .filter_map(|entry| {
            let normalized = path::normalize(&entry.path).to_lowercase();
            if !normalized.ends_with(".xlsx") || !normalized.contains('/') {
                return None;
            }
            Some((
                workbook_score(&normalized),
                normalized.chars().count(),
                entry,
            ))
        })
        .collect();
    candidates.sort_by_key(|(score, length, _)| (*score, *length));
    candidates.first().map(|(_, _, entry)| *entry)
}

/// Locates the request PDF stored next to the package folder.
///
/// `<id>/<id>.pdf` wins; otherwise the shortest `<folder>/<folder>.pdf`.
pub fn find_request_pdf<'a>(entries: &'a [SourceEntry], id: &str) -> Option<&'a SourceEntry> {
    if let Some(found) = find_exact(entries, id, "pdf") {
        return Some(found);
    }
    entries
        .iter()
        .filter(|entry| {
            let normalized = path::normalize(&entry.path);
            let segments: Vec<&str> = normalized.split('/').collect();
            matches!(segments.as_slice(), [folder, file] if !folder.is_empty() && is_named_after(file, folder, "pdf"))
        })
        .min_by_key(|entry| entry.path.chars().count())
}

fn find_exact<'a>(entries: &'a [SourceEntry], id: &str, extension: &str) -> Option<&'a SourceEntry> {
    if id.is_empty() {
        return None;
    }
    let wanted = format!("{id}/{id}.{extension}").to_lowercase();
    entries
        .iter()
        .find(|entry| path::normalize(&entry.path).to_lowercase() == wanted)
}

/// `[<any>/]<RFQ…|PO…>/<same>.xlsx`, compared case-insensitively.
fn is_named_after_tagged_folder(normalized: &str) -> bool {
    let segments: Vec<&str> = normalized.split('/').collect();
    let (folder, file) = match segments.as_slice() {
        [folder, file] | [_, folder, file] => (*folder, *file),
        _ => return false,
    };
    has_tag(folder) && is_named_after(file, folder, "xlsx")
}

fn has_tag(folder: &str) -> bool {
    let lower = folder.to_lowercase();
    lower.starts_with("rfq") || lower.starts_with("po")
}

fn is_named_after(file: &str, folder: &str, extension: &str) -> bool {
    file.to_lowercase() == format!("{folder}.{extension}").to_lowercase()
}

/// Lower is better.
fn workbook_score(lowered: &str) -> i32 {
    let tail = lowered.rsplit('/').next().unwrap_or_default();
    let mut score = 0;
    if lowered.contains("/rfq") {
        score -= 10;
    }
    if lowered.contains("/po") {
        score -= 8;
    }
    if tail.starts_with("rfq") {
        score -= 2;
    }
    if tail.starts_with("po") {
        score -= 2;
    }
    score
}

fn looks_like_file_name(segment: &str) -> bool {
    segment.rsplit_once('.').is_some_and(|(_, suffix)| {
        !suffix.is_empty() && suffix.chars().all(|ch| ch.is_ascii_alphanumeric())
    })
}
