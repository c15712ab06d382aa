//! JSON manifest export.

use std::path::Path;

use chrono::Utc;
use drawpack_model::Manifest;
use serde::Serialize;

use crate::error::{ReportError, Result};

/// Schema identifier embedded in exported manifests.
pub const MANIFEST_SCHEMA: &str = "drawpack.manifest";

/// Schema version embedded in exported manifests.
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ManifestPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    item_count: usize,
    group_count: usize,
    #[serde(flatten)]
    manifest: &'a Manifest,
}

/// Renders `manifest` as pretty JSON with a schema header.
pub fn manifest_json(manifest: &Manifest) -> Result<String> {
    let payload = ManifestPayload {
        schema: MANIFEST_SCHEMA,
        schema_version: MANIFEST_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        item_count: manifest.item_count(),
        group_count: manifest.group_count(),
        manifest,
    };
    serde_json::to_string_pretty(&payload).map_err(|source| ReportError::Json { source })
}

/// Writes [`manifest_json`] to `output_path`.
pub fn write_manifest_json(output_path: &Path, manifest: &Manifest) -> Result<()> {
    let json = manifest_json(manifest)?;
    std::fs::write(output_path, format!("{json}\n")).map_err(|source| ReportError::FileWrite {
        path: output_path.to_path_buf(),
        source,
    })
}
