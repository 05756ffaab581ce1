//! CSV reading utilities.

mod header;
mod reader;

pub use header::{dedupe_headers, normalize_header};
pub use reader::{parse_csv_str, read_csv_dataset};
