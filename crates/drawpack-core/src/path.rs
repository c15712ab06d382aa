//! Path text normalization.
//!
//! Archive entry names arrive with mixed separators, `./` prefixes, and
//! doubled slashes. Everything downstream works on the normalized form:
//! forward slashes, no leading `./`, no empty runs.

/// A normalized path split into directory segments and a file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParts {
    /// Directory segments in order (possibly empty).
    pub segments: Vec<String>,
    /// Last element of the path; empty when the path ends with `/`.
    pub file_name: String,
}

/// Normalizes separators and collapses redundant segments.
///
/// Backslashes become `/`, runs of slashes collapse to one, and leading `./`
/// prefixes are removed. The result is stable under repeated application.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut collapsed = collapse_slashes(&unified);
    while let Some(rest) = collapsed.strip_prefix("./") {
        collapsed = rest.to_string();
    }
    collapsed
}

/// Normalizes `path` and splits it into directory segments and file name.
pub fn split(path: &str) -> PathParts {
    let normalized = normalize(path);
    let mut segments: Vec<String> = normalized.split('/').map(str::to_string).collect();
    let file_name = segments.pop().unwrap_or_default();
    PathParts {
        segments,
        file_name,
    }
}

/// Joins non-empty parts with `/` and collapses doubled slashes.
///
/// A leading `scheme://` is kept intact.
pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    match scheme_prefix_len(&joined) {
        Some(len) => {
            let (scheme, rest) = joined.split_at(len);
            format!("{scheme}{}", collapse_slashes(rest))
        }
        None => collapse_slashes(&joined),
    }
}

/// Lowercased text after the final `.` of a file name, or empty.
pub fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// First segment of a normalized path.
pub fn first_segment(path: &str) -> String {
    normalize(path)
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Last segment of a normalized path.
pub fn file_name(path: &str) -> String {
    split(path).file_name
}

fn collapse_slashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_slash = false;
    for ch in value.chars() {
        if ch == '/' {
            if !last_slash {
                out.push(ch);
            }
            last_slash = true;
        } else {
            out.push(ch);
            last_slash = false;
        }
    }
    out
}

/// Length of a leading `scheme://`, if present.
fn scheme_prefix_len(value: &str) -> Option<usize> {
    let colon = value.find("://")?;
    let scheme = &value[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.')) {
        Some(colon + 3)
    } else {
        None
    }
}
