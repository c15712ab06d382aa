//! Destination path de-duplication.

use std::collections::HashSet;

/// Returns a destination path that is not in `seen` and records it.
///
/// An unseen path is returned unchanged. A seen path is renamed to
/// `"<base> (<n>)<ext>"`, continuing from an existing `" (n)"` suffix
/// (default 1) until an unused name is found. A counter that cannot be
/// incremented is kept as part of the base and numbering restarts at 2.
pub fn resolve(dest_path: &str, seen: &mut HashSet<String>) -> String {
    if seen.insert(dest_path.to_string()) {
        return dest_path.to_string();
    }
    let (stem, extension) = split_extension(dest_path);
    let (mut base, mut counter) = split_counter(stem);
    loop {
        counter = match counter.checked_add(1) {
            Some(next) => next,
            None => {
                base = stem;
                2
            }
        };
        let candidate = format!("{base} ({counter}){extension}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
    }
}

/// Tracks destinations issued during one archive materialization pass.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    seen: HashSet<String>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`resolve`].
    pub fn resolve(&mut self, dest_path: &str) -> String {
        resolve(dest_path, &mut self.seen)
    }

    /// Number of destinations issued so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Splits `dir/name.ext` into (`dir/name`, `.ext`); the dot must be in the last segment.
fn split_extension(path: &str) -> (&str, &str) {
    let name_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => path.split_at(name_start + dot),
        _ => (path, ""),
    }
}

/// Splits `name (3)` into (`name`, 3); names without a counter start at 1.
fn split_counter(stem: &str) -> (&str, u64) {
    let parsed = stem
        .strip_suffix(')')
        .and_then(|inner| inner.rsplit_once(" ("))
        .and_then(|(base, digits)| {
            if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
                return None;
            }
            digits.parse::<u64>().ok().map(|n| (base, n))
        });
    parsed.unwrap_or((stem, 1))
}
