//! Configuration options for one classification run.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Extensions kept in request-for-quotation packages.
pub const RFQ_EXTENSIONS: &[&str] = &["pdf"];

/// Extensions kept in purchase-order packages: documents plus CAD interchange formats.
pub const PO_EXTENSIONS: &[&str] = &[
    "pdf", "dwg", "dxf", "step", "stp", "iges", "igs", "x_t", "x_b", "sat", "stl", "tif", "tiff",
    "doc", "docx", "xls", "xlsx", "txt",
];

/// Packaging mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Request for quotation: PDF drawings only, one reference per drawing folder.
    #[default]
    Rfq,
    /// Purchase order: drawings plus CAD files, every file reported.
    Po,
}

impl Mode {
    /// Tag used as the identifier prefix (`RFQ`, `PO`).
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rfq => "RFQ",
            Self::Po => "PO",
        }
    }

    /// Extension allow-list for this mode (lowercase, without the dot).
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Rfq => RFQ_EXTENSIONS,
            Self::Po => PO_EXTENSIONS,
        }
    }

    /// Returns true if a lowercase extension passes this mode's allow-list.
    pub fn allows_extension(self, extension: &str) -> bool {
        self.allowed_extensions().contains(&extension)
    }

    /// Title used for the document list report.
    pub fn document_list_label(self) -> &'static str {
        match self {
            Self::Rfq => "RFQ Document list",
            Self::Po => "PO Document list",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfq => f.write_str("rfq"),
            Self::Po => f.write_str("po"),
        }
    }
}

impl FromStr for Mode {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("rfq") {
            Ok(Self::Rfq)
        } else if trimmed.eq_ignore_ascii_case("po") {
            Ok(Self::Po)
        } else {
            Err(ModelError::InvalidMode {
                value: value.to_string(),
            })
        }
    }
}

/// Options controlling path classification.
///
/// Built once per run and never mutated while the manifest is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOptions {
    /// Packaging mode; selects the extension allow-list.
    pub mode: Mode,
    /// Top-level destination folder for every output path.
    pub root: String,
    /// Directory names removed before structure detection, stored lowercase.
    pub strip_segments: BTreeSet<String>,
    /// Route unmatched files to `attachments` instead of dropping them.
    pub include_unclassified: bool,
}

impl ClassificationOptions {
    /// Options with no stripping and no unclassified fallback.
    pub fn new(mode: Mode, root: impl Into<String>) -> Self {
        Self {
            mode,
            root: root.into(),
            strip_segments: BTreeSet::new(),
            include_unclassified: false,
        }
    }

    /// Sets the directory names to strip (compared case-insensitively).
    pub fn with_strip_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.strip_segments = segments
            .into_iter()
            .map(|segment| segment.as_ref().trim().to_lowercase())
            .filter(|segment| !segment.is_empty())
            .collect();
        self
    }

    /// Enables or disables the attachments fallback.
    pub fn with_include_unclassified(mut self, enable: bool) -> Self {
        self.include_unclassified = enable;
        self
    }

    /// Returns true if the directory segment should be elided.
    pub fn strips(&self, segment: &str) -> bool {
        !self.strip_segments.is_empty() && self.strip_segments.contains(&segment.to_lowercase())
    }
}
