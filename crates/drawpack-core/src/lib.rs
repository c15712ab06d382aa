//! Drawing package classification engine.
//!
//! Turns a flat list of archive paths into a [`Manifest`]: which files sit
//! under a part-number / drawing-folder pair, where each one goes under the
//! new root, and how they group for reporting. Everything here is pure and
//! synchronous; archive I/O lives in `drawpack-ingest` and `drawpack-report`.
//!
//! # Pipeline
//!
//! 1. [`path`] normalizes entry names.
//! 2. [`structure`] finds the `PN…/DRW…` folder pair.
//! 3. [`classify`] applies stripping, the mode's extension allow-list, and
//!    the attachments fallback.
//! 4. [`manifest`] aggregates items and groups.
//! 5. [`collision`] de-duplicates destinations while an archive is written.
//! 6. [`tree`] renders a preview.
//!
//! # Example
//!
//! ```
//! use drawpack_core::build_manifest;
//! use drawpack_model::{ClassificationOptions, Mode, SourceEntry};
//!
//! let entries = vec![SourceEntry::new("Root/PN1/DRW1/a.pdf")];
//! let options = ClassificationOptions::new(Mode::Rfq, "Out");
//! let manifest = build_manifest(&entries, &options);
//! assert_eq!(manifest.items[0].dest_path, "Out/PN1/DRW1/a.pdf");
//! ```

pub mod classify;
pub mod collision;
pub mod ident;
pub mod manifest;
pub mod natural;
pub mod path;
pub mod structure;
pub mod tree;

pub use classify::{ATTACHMENTS_FOLDER, Exclusion, classify, classify_detailed};
pub use collision::CollisionResolver;
pub use drawpack_model::Manifest;
pub use ident::{
    bundle_file_name, extract_id_candidate, first_id_candidate, package_prefix, safe_title,
    suggest_root,
};
pub use manifest::{ManifestBuild, build_manifest, build_manifest_detailed};
pub use natural::{natural_cmp, sort_natural};
pub use structure::{
    StructureMatch, locate, looks_like_drawing_folder_segment, looks_like_part_number_segment,
};
