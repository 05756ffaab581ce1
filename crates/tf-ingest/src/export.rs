//! CSV export of result datasets.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tf_model::Dataset;

use crate::error::{IngestError, Result};

/// Writes the header row and every record to `writer`.
///
/// Missing cells are empty fields; numbers drop trailing zeros.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&dataset.headers)?;
    for row in &dataset.rows {
        let fields: Vec<_> = (0..dataset.headers.len())
            .map(|idx| row.get(idx).as_text())
            .collect();
        csv_writer.write_record(fields.iter().map(|field| field.as_bytes()))?;
    }
    csv_writer.flush().map_err(|err| IngestError::CsvWrite {
        message: err.to_string(),
    })?;
    Ok(())
}

/// Encodes the dataset as CSV text (the download payload).
pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(dataset, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| IngestError::CsvWrite {
        message: err.to_string(),
    })
}

/// Writes the dataset to a CSV file, replacing any existing file.
pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(dataset, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_model::CellValue;

    #[test]
    fn quotes_fields_with_separators() {
        let mut dataset = Dataset::new(vec!["Name".to_string(), "Modalities".to_string()]);
        dataset.push_row(vec![
            CellValue::from("Ana"),
            CellValue::from("Deep Tissue, Sports"),
        ]);
        let text = to_csv_string(&dataset).expect("encode csv");
        assert_eq!(text, "Name,Modalities\nAna,\"Deep Tissue, Sports\"\n");
    }

    #[test]
    fn empty_dataset_writes_header_only() {
        let dataset = Dataset::new(vec!["Name".to_string()]);
        assert_eq!(to_csv_string(&dataset).expect("encode csv"), "Name\n");
    }
}
