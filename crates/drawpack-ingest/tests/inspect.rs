//! Tests for archive inspection against on-disk uploads.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use drawpack_ingest::{IngestError, ZipSource, inspect, read_title};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const SHEET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>Request</t></is></c></row><row r="4"><c r="B4" t="inlineStr"><is><t>ignored</t></is></c><c r="C4" t="inlineStr"><is><t>Bracket</t></is></c><c r="D4" t="inlineStr"><is><t>assembly</t></is></c><c r="F4"><v>7</v></c><c r="G4" t="inlineStr"><is><t>ignored</t></is></c></row></sheetData></worksheet>"#;

/// Minimal xlsx with "Bracket", "assembly", empty, 7 in C4:F4.
fn workbook_bytes() -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", SHEET_XML),
    ] {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn create_upload(dir: &Path, name: &str, files: &[(&str, Vec<u8>)]) -> PathBuf {
    let zip_path = dir.join(name);
    let file = File::create(&zip_path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (entry_name, content) in files {
        writer.start_file(*entry_name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
    zip_path
}

#[test]
fn reads_title_from_c4_to_f4() {
    assert_eq!(read_title(&workbook_bytes()).unwrap(), "Bracket assembly 7");
}

#[test]
fn invalid_workbook_is_an_error() {
    assert!(matches!(
        read_title(b"plain text"),
        Err(IngestError::WorkbookOpen { .. })
    ));
}

#[test]
fn inspects_rfq_upload() {
    let dir = TempDir::new().unwrap();
    let upload = create_upload(
        dir.path(),
        "upload.zip",
        &[
            ("RFQ4501/RFQ4501.xlsx", workbook_bytes()),
            ("RFQ4501/RFQ4501.pdf", b"%PDF-1.4".to_vec()),
            ("RFQ4501/PN100/DRW1/100.pdf", b"%PDF-1.4".to_vec()),
        ],
    );

    let mut source = ZipSource::open(&upload).unwrap();
    let info = inspect(&mut source).unwrap();

    assert_eq!(info.upload_name, "upload.zip");
    assert_eq!(info.entries.len(), 3);
    assert_eq!(info.top_root, "RFQ4501");
    assert_eq!(info.id, "4501");
    assert_eq!(info.workbook.as_deref(), Some("RFQ4501/RFQ4501.xlsx"));
    assert_eq!(info.title, "Bracket assembly 7");
    assert_eq!(info.request_pdf.as_deref(), Some("RFQ4501/RFQ4501.pdf"));
    assert_eq!(
        info.suggested_root(drawpack_model::Mode::Rfq),
        "RFQ4501 Drawing package"
    );
}

#[test]
fn unreadable_workbook_leaves_title_empty() {
    let dir = TempDir::new().unwrap();
    let upload = create_upload(
        dir.path(),
        "PO 88.zip",
        &[
            ("A/PO88/PO88.xlsx", b"broken".to_vec()),
            ("B/PN1/DRW1/a.pdf", b"%PDF".to_vec()),
        ],
    );

    let mut source = ZipSource::open(&upload).unwrap();
    let info = inspect(&mut source).unwrap();

    assert_eq!(info.top_root, "");
    assert_eq!(info.id, "88");
    assert_eq!(info.workbook.as_deref(), Some("A/PO88/PO88.xlsx"));
    assert_eq!(info.title, "");
    assert_eq!(info.request_pdf, None);
}

#[test]
fn missing_archive_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.zip");
    let error = ZipSource::open(&missing).err().unwrap();
    assert!(matches!(error, IngestError::ArchiveOpen { .. }));
    assert!(error.to_string().contains("nope.zip"));
}
