//! Top-level package bundle assembly.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use drawpack_core::{bundle_file_name, path};
use drawpack_ingest::{PackageInfo, ReadEntry};
use drawpack_model::{Manifest, Mode};
use tracing::{info, info_span};

use crate::archive::{BundleMember, DrawingArchive, build_drawing_archive, write_bundle_archive};
use crate::document_list::{Report, document_list, file_overview};
use crate::error::{ReportError, Result};

/// Everything placed into a bundle, before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePlan {
    /// Output zip name, e.g. `RFQ12 Bracket.zip`.
    pub file_name: String,
    pub mode: Mode,
    pub drawing: DrawingArchive,
    pub overview: Report,
    pub document_list: Report,
    pub members: Vec<BundleMember>,
}

impl BundlePlan {
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|member| member.name.as_str()).collect()
    }
}

/// Builds the drawing archive and reports for `manifest`.
///
/// Members are `<root>.zip`, the overview report, the document list and,
/// for request packages, the request PDF when discovery found one.
pub fn plan_bundle<S: ReadEntry + ?Sized>(
    manifest: &Manifest,
    info: &PackageInfo,
    source: &mut S,
) -> Result<BundlePlan> {
    let span = info_span!("bundle", root = %manifest.root, mode = %manifest.mode);
    let _guard = span.enter();

    let (drawing_bytes, drawing) = build_drawing_archive(manifest, source)?;
    let overview = file_overview(manifest, &info.title);
    let list = document_list(manifest, &manifest.root);

    let mut members = vec![
        BundleMember::new(format!("{}.zip", manifest.root), drawing_bytes),
        BundleMember::new(overview.file_name.clone(), overview.to_csv()?),
        BundleMember::new(list.file_name.clone(), list.to_csv()?),
    ];
    if manifest.mode == Mode::Rfq
        && let Some(pdf) = &info.request_pdf
    {
        members.push(BundleMember::new(path::file_name(pdf), source.read_entry(pdf)?));
    }

    Ok(BundlePlan {
        file_name: bundle_file_name(manifest.mode, &info.id, &info.title),
        mode: manifest.mode,
        drawing,
        overview,
        document_list: list,
        members,
    })
}

/// Writes the planned bundle to `writer`.
pub fn write_bundle<W: Write + Seek>(plan: &BundlePlan, writer: W) -> Result<W> {
    let (writer, names) = write_bundle_archive(&plan.members, writer)?;
    info!(bundle = %plan.file_name, members = ?names, "bundle written");
    Ok(writer)
}

/// In-memory variant of [`write_bundle`].
pub fn bundle_bytes(plan: &BundlePlan) -> Result<Vec<u8>> {
    Ok(write_bundle(plan, Cursor::new(Vec::new()))?.into_inner())
}

/// Writes the planned bundle into `output_dir` under its file name.
pub fn save_bundle(plan: &BundlePlan, output_dir: &Path) -> Result<PathBuf> {
    let output_path = output_dir.join(&plan.file_name);
    let file_error = |source| ReportError::FileWrite {
        path: output_path.clone(),
        source,
    };
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::FileWrite {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let file = std::fs::File::create(&output_path).map_err(file_error)?;
    let mut file = write_bundle(plan, file)?;
    file.flush().map_err(file_error)?;
    Ok(output_path)
}
