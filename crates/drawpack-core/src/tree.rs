//! Text tree preview of manifest destinations.
//!
//! Presentation only; nothing reads the rendered tree back.

use std::collections::BTreeMap;

use drawpack_model::ManifestItem;

use crate::natural::caseless_cmp;
use crate::path;

const BRANCH: &str = "|-- ";
const LAST_BRANCH: &str = "`-- ";
const PIPE: &str = "|   ";
const SPACE: &str = "    ";

#[derive(Debug)]
enum Node {
    Dir(BTreeMap<String, Node>),
    File,
}

/// Renders destination paths as an indented tree.
///
/// Directories come before files at each level, then names sort
/// lexicographically ignoring case. Lines are joined with `\n` without a trailing newline;
/// an empty item list renders as an empty string.
pub fn render(items: &[ManifestItem]) -> String {
    render_paths(items.iter().map(|item| item.dest_path.as_str()))
}

/// Renders arbitrary slash-separated paths as a tree.
pub fn render_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> String {
    let mut root: BTreeMap<String, Node> = BTreeMap::new();
    for raw in paths {
        insert(&mut root, &path::normalize(raw));
    }
    let mut lines = Vec::new();
    render_level(&root, "", &mut lines);
    lines.join("\n")
}

fn insert(root: &mut BTreeMap<String, Node>, normalized: &str) {
    let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
    let mut level = root;
    for (idx, part) in parts.iter().enumerate() {
        let is_file = idx + 1 == parts.len();
        let node = level.entry((*part).to_string()).or_insert_with(|| {
            if is_file {
                Node::File
            } else {
                Node::Dir(BTreeMap::new())
            }
        });
        match node {
            Node::Dir(children) => level = children,
            // A file already occupies this name; the deeper path is dropped.
            Node::File => return,
        }
    }
}

fn render_level(level: &BTreeMap<String, Node>, prefix: &str, lines: &mut Vec<String>) {
    let mut entries: Vec<(&String, &Node)> = level.iter().collect();
    entries.sort_by(|(a_name, a_node), (b_name, b_node)| {
        let a_dir = matches!(a_node, Node::Dir(_));
        let b_dir = matches!(b_node, Node::Dir(_));
        b_dir.cmp(&a_dir).then_with(|| caseless_cmp(a_name, b_name))
    });
    let count = entries.len();
    for (idx, (name, node)) in entries.into_iter().enumerate() {
        let last = idx + 1 == count;
        let connector = if last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{prefix}{connector}{name}"));
        if let Node::Dir(children) = node {
            let child_prefix = format!("{prefix}{}", if last { SPACE } else { PIPE });
            render_level(children, &child_prefix, lines);
        }
    }
}
