use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use drawpack_core::{Exclusion, ManifestBuild};
use drawpack_model::Manifest;
use drawpack_report::Report;

use crate::types::{BuildResult, MailResult, PreviewResult};

pub fn print_preview(result: &PreviewResult) {
    let manifest = &result.build.manifest;
    println!("Root: {}", manifest.root);
    if !result.info.title.is_empty() {
        println!("Title: {}", result.info.title);
    }
    if result.tree.is_empty() {
        println!("(no files found in PN/DRW folders)");
    } else {
        println!("{}", result.tree);
    }
    println!("{}", count_line(manifest));
    if let Some(line) = exclusion_line(&result.build) {
        println!("{line}");
    }
}

pub fn print_build_summary(result: &BuildResult) {
    let manifest = &result.build.manifest;
    println!("Bundle: {}", result.plan.file_name);
    match &result.bundle_path {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }
    if !result.info.title.is_empty() {
        println!("Title: {}", result.info.title);
    }
    for report in [&result.plan.document_list, &result.plan.overview] {
        println!("{}", report_heading_line(report));
    }
    println!("{}", group_table(manifest));
    println!("Contents:");
    for name in result.plan.member_names() {
        println!("- {name}");
    }
    if result.plan.drawing.renamed > 0 {
        println!(
            "Renamed duplicates: {}",
            result.plan.drawing.renamed
        );
    }
    println!("{}", count_line(manifest));
    if let Some(line) = exclusion_line(&result.build) {
        println!("{line}");
    }
}

pub fn print_mail(result: &MailResult) {
    println!("{}", result.mailto);
    if let Some(path) = &result.eml_path {
        println!("Draft: {}", path.display());
    }
}

/// `Files: N · Drawings: M`.
fn count_line(manifest: &Manifest) -> String {
    format!(
        "Files: {} · Drawings: {}",
        manifest.item_count(),
        manifest.group_count()
    )
}

/// `<file name>: <title> / <reference>`.
fn report_heading_line(report: &Report) -> String {
    let headings: Vec<&str> = report.heading_lines().collect();
    format!("{}: {}", report.file_name, headings.join(" / "))
}

fn exclusion_line(build: &ManifestBuild) -> Option<String> {
    if build.exclusions.is_empty() {
        return None;
    }
    let reasons: Vec<String> = build
        .exclusions
        .iter()
        .map(|(reason, count)| format!("{} {count}", Exclusion::label(*reason)))
        .collect();
    Some(format!(
        "Skipped: {} ({})",
        build.excluded_count(),
        reasons.join(", ")
    ))
}

fn group_table(manifest: &Manifest) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Part number"),
        header_cell("Drawing folder"),
        header_cell("Files"),
        header_cell("Drawing refs"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in &manifest.groups {
        table.add_row(vec![
            Cell::new(&group.part_number)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&group.drawing_folder),
            Cell::new(group.file_names.len()),
            Cell::new(group.file_names.join(", ")),
        ]);
    }
    let attachments = manifest.attachments().count();
    if attachments > 0 {
        table.add_row(vec![
            dim_cell("-"),
            dim_cell(drawpack_core::ATTACHMENTS_FOLDER),
            Cell::new(attachments),
            dim_cell("-"),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} folders", manifest.group_count()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(manifest.item_count()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::UpperBoundary(Width::Percentage(50)),
    ]);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
