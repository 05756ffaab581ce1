//! Spreadsheet roster reader (xlsx, xlsm, xlsb, xls, ods).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tf_model::{CellValue, Dataset};
use tracing::debug;

use crate::csv::dedupe_headers;
use crate::error::{IngestError, Result};
use crate::infer::is_na;

/// Extensions read through the workbook reader; everything else is CSV.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// True when `path` carries a spreadsheet extension (any casing).
pub fn is_workbook_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

fn to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if is_na(s) => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.trim().to_string()),
        other => CellValue::text(other.to_string()),
    }
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Reads the first worksheet; its first non-blank row is the header.
pub fn read_workbook_dataset(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|err| IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|err| IngestError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut rows = range.rows().filter(|row| !is_blank_row(row));
    let Some(header_row) = rows.next() else {
        return Ok(Dataset::default());
    };
    let raw_headers: Vec<String> = header_row.iter().map(header_text).collect();
    let mut dataset = Dataset::new(dedupe_headers(&raw_headers));
    for row in rows {
        dataset.push_row(row.iter().map(to_cell).collect());
    }
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        columns = dataset.headers.len(),
        rows = dataset.len(),
        "read workbook"
    );
    Ok(dataset)
}
