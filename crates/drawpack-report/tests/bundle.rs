//! Tests for drawing archives, bundles and exported files.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use drawpack_core::build_manifest;
use drawpack_ingest::{IngestError, PackageInfo, ReadEntry};
use drawpack_model::{ClassificationOptions, Manifest, Mode, SourceEntry};
use drawpack_report::{
    ReportError, TemplateCache, build_drawing_archive, bundle_bytes, document_list,
    draft_request_eml, plan_bundle, save_bundle, write_manifest_json,
};
use mail_parser::{MessageParser, MimeHeaders};
use tempfile::TempDir;
use zip::{CompressionMethod, ZipArchive};

/// Upload contents held in memory.
struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, body)| ((*path).to_string(), body.as_bytes().to_vec()))
                .collect(),
        }
    }

    fn entries(&self, order: &[&str]) -> Vec<SourceEntry> {
        order.iter().copied().map(SourceEntry::from).collect()
    }
}

impl ReadEntry for MemorySource {
    fn read_entry(&mut self, path: &str) -> drawpack_ingest::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| IngestError::EntryRead {
                entry: path.to_string(),
                source: zip::result::ZipError::FileNotFound,
            })
    }
}

fn read_zip(bytes: Vec<u8>) -> Vec<(String, String)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|index| {
            let mut file = archive.by_index(index).unwrap();
            let mut body = String::new();
            file.read_to_string(&mut body).unwrap();
            (file.name().to_string(), body)
        })
        .collect()
}

fn manifest_for(source: &MemorySource, order: &[&str], mode: Mode, root: &str) -> Manifest {
    build_manifest(
        &source.entries(order),
        &ClassificationOptions::new(mode, root),
    )
}

#[test]
fn drawing_archive_renames_duplicate_destinations() {
    let order = ["A/PN1/DRW1/x.pdf", "B/PN1/DRW1/x.pdf", "B/PN1/DRW1/y.pdf"];
    let mut source = MemorySource::new(&[
        ("A/PN1/DRW1/x.pdf", "first"),
        ("B/PN1/DRW1/x.pdf", "second"),
        ("B/PN1/DRW1/y.pdf", "third"),
    ]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "Out");

    let (bytes, archive) = build_drawing_archive(&manifest, &mut source).unwrap();

    assert_eq!(archive.renamed, 1);
    assert_eq!(archive.total_bytes(), 16);
    assert_eq!(
        read_zip(bytes),
        vec![
            ("Out/PN1/DRW1/x.pdf".to_string(), "first".to_string()),
            ("Out/PN1/DRW1/x (2).pdf".to_string(), "second".to_string()),
            ("Out/PN1/DRW1/y.pdf".to_string(), "third".to_string()),
        ]
    );
}

#[test]
fn drawing_archive_uses_deflate() {
    let order = ["R/PN1/DRW1/a.pdf"];
    let mut source = MemorySource::new(&[("R/PN1/DRW1/a.pdf", "aaaaaaaaaaaaaaaaaaaaaaaa")]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "Out");

    let (bytes, _) = build_drawing_archive(&manifest, &mut source).unwrap();

    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let file = archive.by_index(0).unwrap();
    assert_eq!(file.compression(), CompressionMethod::Deflated);
}

#[test]
fn missing_source_bytes_fail_the_archive() {
    let order = ["R/PN1/DRW1/a.pdf"];
    let mut source = MemorySource::new(&[]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "Out");

    let error = build_drawing_archive(&manifest, &mut source).unwrap_err();
    assert!(matches!(error, ReportError::Ingest(IngestError::EntryRead { .. })));
}

#[test]
fn rfq_bundle_includes_request_pdf() {
    let order = ["RFQ12/RFQ12.pdf", "RFQ12/PN1/DRW1/a.pdf"];
    let mut source = MemorySource::new(&[
        ("RFQ12/RFQ12.pdf", "request"),
        ("RFQ12/PN1/DRW1/a.pdf", "drawing"),
    ]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "RFQ12 Drawing package");
    let info = PackageInfo {
        id: "12".to_string(),
        title: "Bracket/left".to_string(),
        request_pdf: Some("RFQ12/RFQ12.pdf".to_string()),
        ..PackageInfo::default()
    };

    let plan = plan_bundle(&manifest, &info, &mut source).unwrap();

    assert_eq!(plan.file_name, "RFQ12 Bracket left.zip");
    assert_eq!(
        plan.member_names(),
        vec![
            "RFQ12 Drawing package.zip",
            "File overview.csv",
            "RFQ12 Document list.csv",
            "RFQ12.pdf",
        ]
    );

    let members = read_zip_raw(bundle_bytes(&plan).unwrap());
    let drawing = members
        .iter()
        .find(|(name, _)| name == "RFQ12 Drawing package.zip")
        .map(|(_, bytes)| bytes.clone())
        .unwrap();
    assert_eq!(
        read_zip(drawing),
        vec![(
            "RFQ12 Drawing package/PN1/DRW1/a.pdf".to_string(),
            "drawing".to_string()
        )]
    );
}

#[test]
fn po_bundle_skips_request_pdf() {
    let order = ["PO5/PO5.pdf", "PO5/PN1/DRW1/a.dxf"];
    let mut source = MemorySource::new(&[("PO5/PO5.pdf", "request"), ("PO5/PN1/DRW1/a.dxf", "x")]);
    let manifest = manifest_for(&source, &order, Mode::Po, "PO5 Drawing package");
    let info = PackageInfo {
        id: "5".to_string(),
        request_pdf: Some("PO5/PO5.pdf".to_string()),
        ..PackageInfo::default()
    };

    let plan = plan_bundle(&manifest, &info, &mut source).unwrap();

    assert_eq!(plan.file_name, "PO5.zip");
    assert_eq!(
        plan.member_names(),
        vec![
            "PO5 Drawing package.zip",
            "File overview.csv",
            "PO5 Document list.csv",
        ]
    );
}

#[test]
fn saved_bundle_lands_in_output_dir() {
    let order = ["R/PN1/DRW1/a.pdf"];
    let mut source = MemorySource::new(&[("R/PN1/DRW1/a.pdf", "a")]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "Out");
    let plan = plan_bundle(&manifest, &PackageInfo::default(), &mut source).unwrap();
    let dir = TempDir::new().unwrap();

    let path = save_bundle(&plan, &dir.path().join("nested")).unwrap();

    assert_eq!(path.file_name().unwrap(), "RFQ.zip");
    let members = read_zip_raw(std::fs::read(&path).unwrap());
    assert_eq!(members.len(), 3);
}

#[test]
fn manifest_json_has_schema_header() {
    let order = ["R/PN1/DRW1/a.pdf", "R/PN1/DRW1/b.pdf"];
    let source = MemorySource::new(&[]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "Out");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("manifest.json");

    write_manifest_json(&output, &manifest).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["schema"], "drawpack.manifest");
    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["root"], "Out");
    assert_eq!(value["mode"], "rfq");
    assert_eq!(value["item_count"], 2);
    assert_eq!(value["groups"][0]["file_names"][1], "b.pdf");
    assert_eq!(value["items"][0]["kind"], "drawing");
}

#[test]
fn po_document_list_csv_snapshot() {
    let order = [
        "R/PN2/DRW1/part.step",
        "R/PN2/DRW1/part.pdf",
        "R/PN1/DRW3/10.pdf",
        "R/PN1/DRW3/9.pdf",
    ];
    let source = MemorySource::new(&[]);
    let manifest = manifest_for(&source, &order, Mode::Po, "PO31 Drawing package");

    let report = document_list(&manifest, &manifest.root);
    let csv = String::from_utf8(report.to_csv().unwrap()).unwrap();

    insta::assert_snapshot!(csv.trim_end(), @r"
    Purchase order: PO31
    PO31 Drawing package
    Part number,Drawing folder,Drawing ref.
    PN1,DRW3,10.pdf
    PN1,DRW3,9.pdf
    PN2,DRW1,part.pdf
    PN2,DRW1,part.step
    ");
}

fn rfq_bundle_source() -> (MemorySource, Manifest) {
    let order = ["RFQ12/RFQ12.pdf", "RFQ12/PN1/DRW1/a.pdf"];
    let source = MemorySource::new(&[
        ("RFQ12/RFQ12.pdf", "request"),
        ("RFQ12/PN1/DRW1/a.pdf", "drawing"),
    ]);
    let manifest = manifest_for(&source, &order, Mode::Rfq, "RFQ12 Drawing package");
    (source, manifest)
}

#[test]
fn request_eml_attaches_bundle_files() {
    let (mut source, manifest) = rfq_bundle_source();
    let info = PackageInfo {
        id: "12".to_string(),
        title: "Bracket/left".to_string(),
        request_pdf: Some("RFQ12/RFQ12.pdf".to_string()),
        ..PackageInfo::default()
    };
    let plan = plan_bundle(&manifest, &info, &mut source).unwrap();
    let templates = TemplateCache::with_body("Hello,\nplease quote.\n");

    let eml = draft_request_eml(&plan, &info.id, &info.title, &templates)
        .unwrap()
        .unwrap();

    assert_eq!(eml.file_name, "RFQ12 - Bracket left.eml");
    assert_eq!(eml.subject, "RFQ12 - Bracket left");
    assert!(String::from_utf8_lossy(&eml.bytes).contains("X-Unsent: 1\r\n"));

    let message = MessageParser::default().parse(&eml.bytes[..]).unwrap();
    assert_eq!(message.subject(), Some("RFQ12 - Bracket left"));
    assert!(message.body_text(0).unwrap().contains("please quote."));

    let attachments: Vec<(String, Vec<u8>)> = message
        .attachments()
        .map(|part| {
            (
                part.attachment_name().unwrap().to_string(),
                part.contents().to_vec(),
            )
        })
        .collect();
    let names: Vec<&str> = attachments.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec!["RFQ12 Drawing package.zip", "File overview.csv", "RFQ12.pdf"]
    );
    assert_eq!(eml.attachments, names);
    assert_eq!(attachments[2].1, b"request");
    assert_eq!(
        read_zip(attachments[0].1.clone()),
        vec![(
            "RFQ12 Drawing package/PN1/DRW1/a.pdf".to_string(),
            "drawing".to_string()
        )]
    );
    assert!(String::from_utf8_lossy(&attachments[1].1).starts_with("RFQ Document list\n"));
}

#[test]
fn request_eml_encodes_non_ascii_subject() {
    let (mut source, manifest) = rfq_bundle_source();
    let info = PackageInfo {
        id: "12".to_string(),
        title: "Bügel".to_string(),
        ..PackageInfo::default()
    };
    let plan = plan_bundle(&manifest, &info, &mut source).unwrap();
    let templates = TemplateCache::with_body("Hello");

    let eml = draft_request_eml(&plan, &info.id, &info.title, &templates)
        .unwrap()
        .unwrap();

    let raw = String::from_utf8_lossy(&eml.bytes);
    assert!(!raw.contains("Bügel"));
    assert!(raw.to_lowercase().contains("=?utf-8?"));
    let message = MessageParser::default().parse(&eml.bytes[..]).unwrap();
    assert_eq!(message.subject(), Some("RFQ12 - Bügel"));
    assert_eq!(message.attachments().count(), 2);
}

#[test]
fn purchase_orders_have_no_request_eml() {
    let order = ["PO5/PN1/DRW1/a.dxf"];
    let mut source = MemorySource::new(&[("PO5/PN1/DRW1/a.dxf", "x")]);
    let manifest = manifest_for(&source, &order, Mode::Po, "PO5 Drawing package");
    let plan = plan_bundle(&manifest, &PackageInfo::default(), &mut source).unwrap();

    let eml = draft_request_eml(&plan, "5", "", &TemplateCache::with_body("x")).unwrap();
    assert!(eml.is_none());
}

#[test]
fn request_eml_saves_into_directory() {
    let (mut source, manifest) = rfq_bundle_source();
    let plan = plan_bundle(&manifest, &PackageInfo::default(), &mut source).unwrap();
    let eml = draft_request_eml(&plan, "12", "", &TemplateCache::with_body("x"))
        .unwrap()
        .unwrap();
    let dir = TempDir::new().unwrap();

    let into_dir = eml.save(dir.path()).unwrap();
    let explicit = eml.save(&dir.path().join("draft.eml")).unwrap();

    assert_eq!(into_dir, dir.path().join("RFQ12.eml"));
    assert_eq!(std::fs::read(explicit).unwrap(), eml.bytes);
}

fn read_zip_raw(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|index| {
            let mut file = archive.by_index(index).unwrap();
            let mut body = Vec::new();
            file.read_to_end(&mut body).unwrap();
            (file.name().to_string(), body)
        })
        .collect()
}
