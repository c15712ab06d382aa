//! Detection of the part-number / drawing-folder pair in a directory path.
//!
//! A drawing lives under `.../PN<part>/DRW<drawing>/...`. The two folders are
//! treated as one unit: the drawing folder must directly follow the first
//! part-number folder, otherwise the path has no structure at all.

/// Prefix marking a part-number folder.
pub const PART_NUMBER_PREFIX: &str = "PN";

/// Prefix marking a drawing folder.
pub const DRAWING_FOLDER_PREFIX: &str = "DRW";

/// Indices of the matched pair within the directory segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureMatch {
    pub part_index: usize,
    pub drawing_index: usize,
}

/// Returns true for `PN` followed by at least one non-slash character.
///
/// The prefix is compared case-insensitively against the whole segment.
pub fn looks_like_part_number_segment(segment: &str) -> bool {
    has_tagged_prefix(segment, PART_NUMBER_PREFIX)
}

/// Returns true for `DRW` followed by at least one non-slash character.
pub fn looks_like_drawing_folder_segment(segment: &str) -> bool {
    has_tagged_prefix(segment, DRAWING_FOLDER_PREFIX)
}

/// Locates the first part-number segment and the drawing folder after it.
///
/// Scanning stops at the first part-number segment; if it is the last segment
/// or the next segment is not a drawing folder, there is no match.
pub fn locate<S: AsRef<str>>(segments: &[S]) -> Option<StructureMatch> {
    let part_index = segments
        .iter()
        .position(|segment| looks_like_part_number_segment(segment.as_ref()))?;
    let drawing_index = part_index + 1;
    let next = segments.get(drawing_index)?;
    if looks_like_drawing_folder_segment(next.as_ref()) {
        Some(StructureMatch {
            part_index,
            drawing_index,
        })
    } else {
        None
    }
}

fn has_tagged_prefix(segment: &str, prefix: &str) -> bool {
    let Some(head) = segment.get(..prefix.len()) else {
        return false;
    };
    let rest = &segment[prefix.len()..];
    head.eq_ignore_ascii_case(prefix) && !rest.is_empty() && !rest.contains('/')
}
