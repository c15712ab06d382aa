//! Output generation for drawing packages.
//!
//! This crate turns a [`Manifest`](drawpack_model::Manifest) into files:
//!
//! - **Drawing archive**: every item copied to its collision-free destination
//! - **Reports**: document lists (rfq and po flavours) and the file overview, as CSV
//! - **Bundle**: the top-level zip combining the archive, reports and request PDF
//! - **Manifest export**: pretty JSON with a schema header
//! - **Mail draft**: subject, templated body and `mailto:` link
//! - **Request message**: an unsent `.eml` with the bundle files attached

mod archive;
mod bundle;
mod document_list;
mod eml;
mod error;
mod export;
mod mail;

// === Error Types ===
pub use error::{ReportError, Result};

// === Archives ===
pub use archive::{
    BundleMember, COMPRESSION_LEVEL, DrawingArchive, WrittenEntry, build_drawing_archive,
    write_bundle_archive, write_drawing_archive,
};
pub use bundle::{BundlePlan, bundle_bytes, plan_bundle, save_bundle, write_bundle};

// === Reports ===
pub use document_list::{
    OVERVIEW_FILE_NAME, REPORT_HEADERS, Report, ReportRow, document_list, document_list_file_name,
    file_overview,
};

// === Manifest Export ===
pub use export::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, manifest_json, write_manifest_json};

// === Mail ===
pub use eml::{ATTACHMENT_CONTENT_TYPE, RequestEml, draft_request_eml, eml_file_name};
pub use mail::{FALLBACK_TEMPLATE, MailDraft, TemplateCache, draft_request_mail, mail_subject};
