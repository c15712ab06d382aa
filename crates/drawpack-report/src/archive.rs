//! Zip output: the drawing package and the top-level bundle.

use std::io::{Cursor, Seek, Write};

use chrono::{Datelike, Local, Timelike};
use drawpack_core::CollisionResolver;
use drawpack_ingest::ReadEntry;
use drawpack_model::Manifest;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ReportError, Result};

/// Deflate level used for every written archive.
pub const COMPRESSION_LEVEL: i64 = 6;

/// One file placed into the drawing archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenEntry {
    pub source_path: String,
    /// Destination after collision resolution.
    pub dest_path: String,
    pub size: usize,
}

/// Outcome of writing a drawing archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawingArchive {
    pub entries: Vec<WrittenEntry>,
    /// Entries whose destination had to be renamed.
    pub renamed: usize,
}

impl DrawingArchive {
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(|entry| entry.size).sum()
    }
}

/// Writes every manifest item into a new zip, in item order.
///
/// Bytes come from `source` at each item's source path; destinations pass
/// through a fresh [`CollisionResolver`].
pub fn write_drawing_archive<W, S>(
    manifest: &Manifest,
    source: &mut S,
    writer: W,
) -> Result<(W, DrawingArchive)>
where
    W: Write + Seek,
    S: ReadEntry + ?Sized,
{
    let mut zip = ZipWriter::new(writer);
    let options = file_options();
    let mut resolver = CollisionResolver::new();
    let mut archive = DrawingArchive::default();

    for item in &manifest.items {
        let bytes = source.read_entry(&item.source_path)?;
        let dest_path = resolver.resolve(&item.dest_path);
        if dest_path != item.dest_path {
            debug!(planned = %item.dest_path, resolved = %dest_path, "renamed duplicate destination");
            archive.renamed += 1;
        }
        add_file(&mut zip, &dest_path, &bytes, options)?;
        archive.entries.push(WrittenEntry {
            source_path: item.source_path.clone(),
            dest_path,
            size: bytes.len(),
        });
    }

    let writer = finish(zip, &manifest.root)?;
    info!(
        root = %manifest.root,
        files = archive.entries.len(),
        renamed = archive.renamed,
        bytes = archive.total_bytes(),
        "drawing archive written"
    );
    Ok((writer, archive))
}

/// In-memory variant of [`write_drawing_archive`].
pub fn build_drawing_archive<S: ReadEntry + ?Sized>(
    manifest: &Manifest,
    source: &mut S,
) -> Result<(Vec<u8>, DrawingArchive)> {
    let (cursor, archive) = write_drawing_archive(manifest, source, Cursor::new(Vec::new()))?;
    Ok((cursor.into_inner(), archive))
}

/// A named file to place at the top level of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMember {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl BundleMember {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Writes `members` into a flat zip and returns the member names used.
pub fn write_bundle_archive<W: Write + Seek>(
    members: &[BundleMember],
    writer: W,
) -> Result<(W, Vec<String>)> {
    let mut zip = ZipWriter::new(writer);
    let options = file_options();
    let mut resolver = CollisionResolver::new();
    let mut names = Vec::with_capacity(members.len());
    for member in members {
        let name = resolver.resolve(&member.name);
        add_file(&mut zip, &name, &member.bytes, options)?;
        names.push(name);
    }
    let writer = finish(zip, "bundle")?;
    Ok((writer, names))
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    bytes: &[u8],
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|source| ReportError::ArchiveEntry {
            entry: name.to_string(),
            source,
        })?;
    zip.write_all(bytes)
        .map_err(|source| ReportError::ArchiveData {
            entry: name.to_string(),
            source,
        })
}

fn finish<W: Write + Seek>(zip: ZipWriter<W>, label: &str) -> Result<W> {
    zip.finish().map_err(|source| ReportError::ArchiveEntry {
        entry: label.to_string(),
        source,
    })
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
        .last_modified_time(archive_timestamp())
}

/// Local wall-clock time, or the zip epoch when it cannot be represented.
fn archive_timestamp() -> zip::DateTime {
    let now = Local::now().naive_local();
    u16::try_from(now.year())
        .ok()
        .and_then(|year| {
            zip::DateTime::from_date_and_time(
                year,
                now.month() as u8,
                now.day() as u8,
                now.hour() as u8,
                now.minute() as u8,
                now.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}
