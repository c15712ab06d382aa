//! Data model for drawing package manifests.
//!
//! These types are the hand-off between the classification engine in
//! `drawpack-core` and the archive, report, and preview collaborators.

pub mod error;
pub mod manifest;
pub mod options;

pub use error::{ModelError, Result};
pub use manifest::{DrawingGroup, ItemKind, Manifest, ManifestItem, SourceEntry};
pub use options::{ClassificationOptions, Mode, PO_EXTENSIONS, RFQ_EXTENSIONS};
