//! Roster ingestion and export.
//!
//! This crate turns provider roster files into typed
//! [`Dataset`](tf_model::Dataset)s and writes filtered results back out.
//!
//! # Features
//!
//! - **CSV Loading**: first non-blank row is the header, blank rows skipped
//! - **Spreadsheet Loading**: first worksheet of xlsx/xlsm/xlsb/xls/ods files
//! - **Type Inference**: numeric and boolean columns detected per column
//! - **CSV Export**: result datasets re-encoded for files or downloads
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tf_ingest::{load_dataset, to_csv_string};
//!
//! let dataset = load_dataset(Path::new("massage_candidates.csv"))?;
//! let csv = to_csv_string(&dataset)?;
//! ```

#![deny(unsafe_code)]

mod csv;
mod error;
mod export;
mod infer;
mod workbook;

use std::path::Path;

use tf_model::Dataset;
use tracing::{info, info_span};

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use crate::csv::{dedupe_headers, normalize_header, parse_csv_str, read_csv_dataset};
pub use workbook::{WORKBOOK_EXTENSIONS, is_workbook_path, read_workbook_dataset};

// === Typing ===
pub use infer::{ColumnKind, NA_VALUES, infer_kind, is_na};

// === Export ===
pub use export::{to_csv_string, write_csv, write_csv_file};

/// Loads a roster file, choosing the reader from the file extension.
///
/// Spreadsheet extensions go through the workbook reader; anything else is
/// read as CSV.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(IngestError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::other("not a regular file"),
        });
    }
    let dataset = if is_workbook_path(path) {
        read_workbook_dataset(path)?
    } else {
        read_csv_dataset(path)?
    };
    info!(
        rows = dataset.len(),
        columns = dataset.headers.len(),
        "loaded roster"
    );
    Ok(dataset)
}
