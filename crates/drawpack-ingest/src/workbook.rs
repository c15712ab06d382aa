//! Request workbook title extraction.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::{IngestError, Result};

/// Zero-based row of the title cells (row 4).
const TITLE_ROW: u32 = 3;

/// Zero-based columns of the title cells (C through F).
const TITLE_COLUMNS: std::ops::RangeInclusive<u32> = 2..=5;

/// Reads the package title from cells C4:F4 of the first worksheet.
///
/// Non-empty cell texts are trimmed and joined with a single space. A
/// workbook without those cells yields an empty title.
pub fn read_title(bytes: &[u8]) -> Result<String> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|source| IngestError::WorkbookOpen { source })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)?
        .map_err(|source| IngestError::WorkbookOpen { source })?;

    let parts: Vec<String> = TITLE_COLUMNS
        .filter_map(|column| range.get_value((TITLE_ROW, column)))
        .map(cell_text)
        .filter(|text| !text.is_empty())
        .collect();
    Ok(parts.join(" "))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}
