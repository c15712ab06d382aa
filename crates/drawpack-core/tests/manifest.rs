//! End-to-end tests for manifest construction.

use drawpack_core::{build_manifest, tree};
use drawpack_model::{ClassificationOptions, DrawingGroup, Mode, SourceEntry};

fn entries(paths: &[&str]) -> Vec<SourceEntry> {
    paths.iter().copied().map(SourceEntry::from).collect()
}

#[test]
fn po_manifest_preserves_subfolders_and_drops_loose_files() {
    let input = entries(&[
        "Root/PNA1/DRWB1/file1.pdf",
        "Root/PNA1/DRWB1/sub/file2.pdf",
        "Root/loose.txt",
    ]);
    let options = ClassificationOptions::new(Mode::Po, "Out");

    let manifest = build_manifest(&input, &options);

    let dests: Vec<&str> = manifest
        .items
        .iter()
        .map(|item| item.dest_path.as_str())
        .collect();
    assert_eq!(
        dests,
        vec!["Out/PNA1/DRWB1/file1.pdf", "Out/PNA1/DRWB1/sub/file2.pdf"]
    );
    assert_eq!(manifest.groups.len(), 1);
    let group = &manifest.groups[0];
    assert_eq!(group.part_number, "PNA1");
    assert_eq!(group.drawing_folder, "DRWB1");
    assert_eq!(group.file_names, vec!["file1.pdf", "file2.pdf"]);
    assert!(
        manifest
            .items
            .iter()
            .all(|item| !item.source_path.ends_with("loose.txt"))
    );
    assert_eq!(manifest.root, "Out");
    assert_eq!(manifest.mode, Mode::Po);
}

#[test]
fn rebuilding_is_deterministic() {
    let input = entries(&[
        "Export/PN20/DRW2/10.pdf",
        "Export/PN20/DRW2/9.pdf",
        "Export/PN3/DRW1/a.pdf",
        "Export/PN3/DRW1/a.dxf",
        "Export/misc/readme.txt",
    ]);
    let options = ClassificationOptions::new(Mode::Po, "PO1 Drawing package")
        .with_include_unclassified(true);

    let first = build_manifest(&input, &options);
    let second = build_manifest(&input, &options);

    assert_eq!(first, second);
    assert_eq!(tree::render(&first.items), tree::render(&second.items));
}

#[test]
fn rfq_groups_only_hold_pdfs() {
    let input = entries(&[
        "R/PN1/DRW1/a.dxf",
        "R/PN1/DRW1/a.pdf",
        "R/PN2/DRW9/b.step",
    ]);
    let options = ClassificationOptions::new(Mode::Rfq, "Out");

    let manifest = build_manifest(&input, &options);

    assert_eq!(manifest.item_count(), 1);
    let keys: Vec<String> = manifest.groups.iter().map(DrawingGroup::sort_key).collect();
    assert_eq!(keys, vec!["PN1DRW1"]);
}

#[test]
fn tree_preview_snapshot() {
    let input = entries(&[
        "Root/PNA1/DRWB1/file1.pdf",
        "Root/PNA1/DRWB1/sub/file2.pdf",
        "Root/PNA0/DRW7/x.pdf",
    ]);
    let options = ClassificationOptions::new(Mode::Po, "Out");
    let manifest = build_manifest(&input, &options);

    insta::assert_snapshot!(tree::render(&manifest.items), @r"
    `-- Out
        |-- PNA0
        |   `-- DRW7
        |       `-- x.pdf
        `-- PNA1
            `-- DRWB1
                |-- sub
                |   `-- file2.pdf
                `-- file1.pdf
    ");
}
