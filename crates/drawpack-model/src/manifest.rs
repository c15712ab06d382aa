use serde::{Deserialize, Serialize};

use crate::options::Mode;

/// One file listed by the archive reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceEntry {
    pub path: String,
}

impl SourceEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl From<&str> for SourceEntry {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// How a manifest item was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Matched a part-number / drawing-folder pair and passed the allow-list.
    Drawing,
    /// Routed to the attachments folder by the unclassified fallback.
    Attachment,
}

/// A classified source file and its destination.
///
/// For [`ItemKind::Drawing`] items `dest_path` is
/// `root/part_number/drawing_folder/.../file_name`. Attachment items carry
/// empty part-number and drawing-folder fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub source_path: String,
    pub dest_path: String,
    pub part_number: String,
    pub drawing_folder: String,
    pub file_name: String,
    pub extension: String,
    pub kind: ItemKind,
}

impl ManifestItem {
    pub fn is_drawing(&self) -> bool {
        self.kind == ItemKind::Drawing
    }

    /// Grouping key: `part_number + "/" + drawing_folder`.
    pub fn group_key(&self) -> String {
        format!("{}/{}", self.part_number, self.drawing_folder)
    }
}

/// The files found under one part-number / drawing-folder pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingGroup {
    pub part_number: String,
    pub drawing_folder: String,
    /// File names in natural order.
    pub file_names: Vec<String>,
}

impl DrawingGroup {
    pub fn new(part_number: impl Into<String>, drawing_folder: impl Into<String>) -> Self {
        Self {
            part_number: part_number.into(),
            drawing_folder: drawing_folder.into(),
            file_names: Vec::new(),
        }
    }

    /// Sort key used to order groups within a manifest.
    pub fn sort_key(&self) -> String {
        format!("{}{}", self.part_number, self.drawing_folder)
    }

    /// First file whose extension matches `extension` (case-insensitive).
    pub fn first_with_extension(&self, extension: &str) -> Option<&str> {
        self.file_names
            .iter()
            .find(|name| {
                name.rsplit_once('.')
                    .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(extension))
            })
            .map(String::as_str)
    }
}

/// Result of one manifest build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub root: String,
    pub mode: Mode,
    /// Classified items in input order.
    pub items: Vec<ManifestItem>,
    /// Groups ordered by `part_number + drawing_folder`.
    pub groups: Vec<DrawingGroup>,
}

impl Manifest {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items placed under the attachments folder.
    pub fn attachments(&self) -> impl Iterator<Item = &ManifestItem> {
        self.items.iter().filter(|item| !item.is_drawing())
    }
}
