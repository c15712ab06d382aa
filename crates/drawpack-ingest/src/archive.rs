//! Zip archive listing and entry access.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use drawpack_model::SourceEntry;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{IngestError, Result};

/// Fetches the bytes stored under a source path.
pub trait ReadEntry {
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>>;
}

/// An opened upload archive.
pub struct ZipSource<R> {
    path: PathBuf,
    archive: ZipArchive<R>,
}

impl ZipSource<File> {
    /// Opens the zip archive at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestError::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }
}

impl<R: Read + Seek> ZipSource<R> {
    /// Wraps an already opened reader; `path` is only used for messages.
    pub fn from_reader(reader: R, path: &Path) -> Result<Self> {
        let archive = ZipArchive::new(reader).map_err(|source| IngestError::ZipRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the archive, used as a fallback identifier source.
    pub fn upload_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Lists every non-directory entry in archive order.
    pub fn entries(&mut self) -> Result<Vec<SourceEntry>> {
        let mut entries = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let file = self
                .archive
                .by_index_raw(index)
                .map_err(|source| IngestError::EntryRead {
                    entry: format!("#{index}"),
                    source,
                })?;
            if file.is_dir() {
                continue;
            }
            entries.push(SourceEntry::new(file.name()));
        }
        debug!(
            archive = %self.path.display(),
            entry_count = entries.len(),
            "listed archive entries"
        );
        Ok(entries)
    }
}

impl<R: Read + Seek> ReadEntry for ZipSource<R> {
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_name(path)
            .map_err(|source| IngestError::EntryRead {
                entry: path.to_string(),
                source,
            })?;
        let mut bytes = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
        file.read_to_end(&mut bytes)
            .map_err(|source| IngestError::EntryExtract {
                entry: path.to_string(),
                source,
            })?;
        Ok(bytes)
    }
}
