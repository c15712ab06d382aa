//! Package identifier extraction and naming helpers.
//!
//! Identifiers are advisory: they come from folder or upload names and feed
//! default root names, report titles, and output file names.

use std::sync::LazyLock;

use drawpack_model::Mode;
use regex::Regex;

/// `RFQ` or `PO` tag, optional whitespace, digits, optional `-digits` groups.
static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:RFQ|PO)\s*([0-9]+(?:-[0-9]+)*)").expect("Invalid identifier regex")
});

/// Characters that cannot appear in output file names.
static UNSAFE_FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]+"#).expect("Invalid file name regex"));

/// Extracts the numeric part of the first `RFQ`/`PO` identifier in `text`.
///
/// Returns an empty string when no identifier is present.
pub fn extract_id_candidate(text: &str) -> String {
    IDENTIFIER_REGEX
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

/// Returns the identifier from the first candidate text that has one.
pub fn first_id_candidate<S: AsRef<str>>(candidates: &[S]) -> String {
    candidates
        .iter()
        .map(|text| extract_id_candidate(text.as_ref()))
        .find(|id| !id.is_empty())
        .unwrap_or_default()
}

/// `RFQ1234` / `PO1234`, or the bare tag when the identifier is unknown.
pub fn package_prefix(mode: Mode, id: &str) -> String {
    format!("{}{}", mode.tag(), id.trim())
}

/// Default root folder name for a package, e.g. `RFQ1234 Drawing package`.
pub fn suggest_root(mode: Mode, id: &str) -> String {
    format!("{} Drawing package", package_prefix(mode, id))
}

/// Replaces characters that are invalid in file names with a space and trims.
pub fn safe_title(title: &str) -> String {
    UNSAFE_FILENAME_REGEX
        .replace_all(title, " ")
        .trim()
        .to_string()
}

/// Output bundle name: `<prefix> <title>.zip`, or `<prefix>.zip` without a title.
pub fn bundle_file_name(mode: Mode, id: &str, title: &str) -> String {
    let prefix = package_prefix(mode, id);
    let title = safe_title(title);
    if title.is_empty() {
        format!("{prefix}.zip")
    } else {
        format!("{prefix} {title}.zip")
    }
}
