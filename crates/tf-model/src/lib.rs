//! Data model shared by the therapist finder crates.
//!
//! A [`Dataset`] is a header list plus positional [`Record`]s. The column
//! resolver turns the headers into a [`ColumnMapping`] over the fixed set of
//! [`CanonicalField`]s, and the filter pipeline evaluates a [`FilterRequest`]
//! and [`SortRequest`] against both.

pub mod cell;
pub mod dataset;
pub mod field;
pub mod mapping;
pub mod request;

pub use cell::{CellValue, format_numeric};
pub use dataset::{Dataset, Record};
pub use field::CanonicalField;
pub use mapping::ColumnMapping;
pub use request::{Criterion, FilterRequest, SortKey, SortRequest, SortWarning, split_list};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_serializes() {
        let mut dataset = Dataset::new(vec!["City".to_string(), "Price".to_string()]);
        dataset.push_row(vec![
            CellValue::Text("Vancouver".to_string()),
            CellValue::Number(100.0),
        ]);
        let json = serde_json::to_string(&dataset).expect("serialize dataset");
        let round: Dataset = serde_json::from_str(&json).expect("deserialize dataset");
        assert_eq!(round, dataset);
    }
}
