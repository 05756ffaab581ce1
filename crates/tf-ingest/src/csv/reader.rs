//! CSV roster reader.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tf_model::Dataset;
use tracing::debug;

use super::header::dedupe_headers;
use crate::error::{IngestError, Result};
use crate::infer::type_rows;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Splits raw rows into a header row and data rows, dropping blank rows.
fn split_header(raw_rows: Vec<Vec<String>>) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rows = raw_rows
        .into_iter()
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()));
    let Some(header_row) = rows.next() else {
        return (Vec::new(), Vec::new());
    };
    (dedupe_headers(&header_row), rows.collect())
}

/// Builds a typed dataset from a header row and raw data rows.
fn build_dataset(headers: Vec<String>, rows: &[Vec<String>]) -> Dataset {
    let typed = type_rows(headers.len(), rows);
    let mut dataset = Dataset::new(headers);
    for cells in typed {
        dataset.push_row(cells);
    }
    dataset
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Vec<Vec<String>>> {
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(raw_rows)
}

fn builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

/// Reads a CSV file whose first non-blank row is the header.
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    let reader = builder()
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let (headers, rows) = split_header(collect_rows(reader, path)?);
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv"
    );
    Ok(build_dataset(headers, &rows))
}

/// Parses CSV text already held in memory (an uploaded file, for example).
pub fn parse_csv_str(text: &str) -> Result<Dataset> {
    let reader = builder().from_reader(text.as_bytes());
    let (headers, rows) = split_header(collect_rows(reader, Path::new("<memory>"))?);
    Ok(build_dataset(headers, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn split_header_skips_leading_blank_rows() {
        let (headers, rows) = split_header(vec![
            strings(&["", ""]),
            strings(&["Name", "City"]),
            strings(&["", " "]),
            strings(&["Ana", "Vancouver"]),
        ]);
        assert_eq!(headers, strings(&["Name", "City"]));
        assert_eq!(rows, vec![strings(&["Ana", "Vancouver"])]);
    }

    #[test]
    fn parses_in_memory_text() {
        let dataset = parse_csv_str("\u{feff}Name,Rating\nAna,4.5\n").expect("parse csv");
        assert_eq!(dataset.headers, strings(&["Name", "Rating"]));
        assert_eq!(
            dataset.value(&dataset.rows[0], "Rating"),
            Some(&tf_model::CellValue::Number(4.5))
        );
    }

    #[test]
    fn split_header_of_nothing_is_empty() {
        let (headers, rows) = split_header(Vec::new());
        assert!(headers.is_empty());
        assert!(rows.is_empty());
    }
}
