//! Tabular package reports.
//!
//! Every report shares the same three columns. Reports are written as CSV
//! with the title and reference lines as single-field records ahead of the
//! column header.

use std::sync::LazyLock;

use drawpack_core::path;
use drawpack_model::{Manifest, Mode};
use regex::Regex;
use tracing::debug;

use crate::error::{ReportError, Result};

/// Column headers shared by every report.
pub const REPORT_HEADERS: [&str; 3] = ["Part number", "Drawing folder", "Drawing ref."];

/// File name of the per-group overview report.
pub const OVERVIEW_FILE_NAME: &str = "File overview.csv";

static RFQ_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)RFQ\s*([0-9]+)").expect("Invalid RFQ number regex"));

static PO_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PO\s*([0-9]+)").expect("Invalid PO number regex"));

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub part_number: String,
    pub drawing_folder: String,
    pub drawing_ref: String,
}

impl ReportRow {
    fn new(part_number: &str, drawing_folder: &str, drawing_ref: impl Into<String>) -> Self {
        Self {
            part_number: part_number.to_string(),
            drawing_folder: drawing_folder.to_string(),
            drawing_ref: drawing_ref.into(),
        }
    }
}

/// A rendered report and where it should be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub title: String,
    /// Second header line; may be empty.
    pub reference: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Serializes the title, the reference (when set), the header and rows as CSV.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let csv_error = |source: csv::Error| ReportError::Csv {
            name: self.file_name.clone(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        for line in self.heading_lines() {
            writer.write_record([line]).map_err(csv_error)?;
        }
        writer.write_record(REPORT_HEADERS).map_err(csv_error)?;
        for row in &self.rows {
            writer
                .write_record([
                    row.part_number.as_str(),
                    row.drawing_folder.as_str(),
                    row.drawing_ref.as_str(),
                ])
                .map_err(csv_error)?;
        }
        writer
            .into_inner()
            .map_err(|error| csv_error(error.into_error().into()))
    }

    /// Title followed by the reference line, skipping blanks.
    pub fn heading_lines(&self) -> impl Iterator<Item = &str> {
        [self.title.as_str(), self.reference.as_str()]
            .into_iter()
            .filter(|line| !line.trim().is_empty())
    }
}

/// Builds the document list for the manifest's mode.
///
/// Package numbers are read from `title_source` (normally the root name).
/// In rfq mode each group contributes its first PDF, and groups without one
/// are skipped. In po mode every file of every group is listed, ordered by
/// extension then name.
pub fn document_list(manifest: &Manifest, title_source: &str) -> Report {
    let rfq = tagged_number(&RFQ_NUMBER_REGEX, title_source);
    let report = match manifest.mode {
        Mode::Rfq => Report {
            file_name: document_list_file_name(Mode::Rfq, &rfq),
            title: labelled("Request document", "RFQ", &rfq),
            reference: manifest.root.clone(),
            rows: manifest
                .groups
                .iter()
                .filter_map(|group| {
                    group.first_with_extension("pdf").map(|name| {
                        ReportRow::new(&group.part_number, &group.drawing_folder, name)
                    })
                })
                .collect(),
        },
        Mode::Po => {
            let po = tagged_number(&PO_NUMBER_REGEX, title_source);
            let reference = if rfq.is_empty() {
                manifest.root.clone()
            } else {
                format!("Reference document: RFQ{rfq}")
            };
            Report {
                file_name: document_list_file_name(Mode::Po, &po),
                title: labelled("Purchase order", "PO", &po),
                reference,
                rows: manifest
                    .groups
                    .iter()
                    .flat_map(|group| {
                        let mut names: Vec<&String> = group.file_names.iter().collect();
                        names.sort_by_cached_key(|name| {
                            format!("{}{}", path::extension(name), name).to_lowercase()
                        });
                        names.into_iter().map(move |name| {
                            ReportRow::new(&group.part_number, &group.drawing_folder, name.as_str())
                        })
                    })
                    .collect(),
            }
        }
    };
    debug!(
        mode = %manifest.mode,
        file_name = %report.file_name,
        rows = report.rows.len(),
        "document list built"
    );
    report
}

/// One row per group listing all of its files.
pub fn file_overview(manifest: &Manifest, title: &str) -> Report {
    Report {
        file_name: OVERVIEW_FILE_NAME.to_string(),
        title: manifest.mode.document_list_label().to_string(),
        reference: title.trim().to_string(),
        rows: manifest
            .groups
            .iter()
            .map(|group| {
                ReportRow::new(
                    &group.part_number,
                    &group.drawing_folder,
                    group.file_names.join(", "),
                )
            })
            .collect(),
    }
}

/// `RFQ1234 Document list.csv`, or `RFQ Document list.csv` without a number.
pub fn document_list_file_name(mode: Mode, number: &str) -> String {
    format!("{}{} Document list.csv", mode.tag(), number)
}

fn labelled(label: &str, tag: &str, number: &str) -> String {
    if number.is_empty() {
        label.to_string()
    } else {
        format!("{label}: {tag}{number}")
    }
}

fn tagged_number(regex: &Regex, text: &str) -> String {
    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}
