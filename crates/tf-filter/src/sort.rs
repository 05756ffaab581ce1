//! Sort key resolution and stable multi-key ordering.

use std::cmp::Ordering;

use tf_model::{CanonicalField, CellValue, ColumnMapping, Dataset, Record, SortRequest, SortWarning};
use tracing::{debug, warn};

/// A sort key bound to a dataset column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSortKey {
    pub requested: String,
    pub header: String,
    pub column: usize,
    pub descending: bool,
}

/// Binds each requested key to a column.
///
/// Lookup order: exact header, then a resolved canonical field name, then a
/// case-insensitive header match. Keys that match nothing produce a warning
/// and are left out.
pub fn resolve_sort_keys(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    request: &SortRequest,
) -> (Vec<ResolvedSortKey>, Vec<SortWarning>) {
    let mut resolved = Vec::new();
    let mut warnings = Vec::new();
    for key in &request.keys {
        match resolve_key(dataset, mapping, &key.name) {
            Some(column) => {
                let header = dataset.headers[column].clone();
                debug!(key = %key.name, header = %header, descending = key.descending, "sort key");
                resolved.push(ResolvedSortKey {
                    requested: key.name.clone(),
                    header,
                    column,
                    descending: key.descending,
                });
            }
            None => {
                let warning = SortWarning {
                    key: key.name.clone(),
                };
                warn!(key = %key.name, "{warning}");
                warnings.push(warning);
            }
        }
    }
    (resolved, warnings)
}

fn resolve_key(dataset: &Dataset, mapping: &ColumnMapping, key: &str) -> Option<usize> {
    if let Some(column) = dataset.column_index(key) {
        return Some(column);
    }
    let lowered = key.to_lowercase();
    let canonical = CanonicalField::from_name(&lowered)
        .and_then(|field| mapping.get(field))
        .and_then(|header| dataset.column_index(header));
    if canonical.is_some() {
        return canonical;
    }
    dataset
        .headers
        .iter()
        .position(|header| header.to_lowercase() == lowered)
}

/// Sorts rows in place by the resolved keys. The sort is stable.
pub fn sort_rows(rows: &mut [Record], keys: &[ResolvedSortKey]) {
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for key in keys {
            let ordering = compare_cells(a.get(key.column), b.get(key.column));
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Ascending cell order with missing values lowest.
///
/// Numbers compare numerically (NaN counts as missing), text by code point,
/// booleans `false < true`; across kinds `Bool < Number < Text`.
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) if !x.is_nan() && !y.is_nan() => {
            x.total_cmp(y)
        }
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(cell: &CellValue) -> u8 {
    match cell {
        CellValue::Missing => 0,
        CellValue::Number(value) if value.is_nan() => 0,
        CellValue::Bool(_) => 1,
        CellValue::Number(_) => 2,
        CellValue::Text(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_model::SortKey;

    fn dataset() -> Dataset {
        let mut dataset = Dataset::new(vec!["Fee".into(), "Stars".into(), "stars".into()]);
        dataset.push_row(vec![100.0.into(), 4.5.into(), "a".into()]);
        dataset
    }

    fn mapping() -> ColumnMapping {
        let mut mapping = ColumnMapping::new();
        mapping.insert(CanonicalField::Price, "Fee");
        mapping
    }

    #[test]
    fn exact_header_beats_case_insensitive_match() {
        let request = SortRequest {
            keys: vec![SortKey::ascending("stars")],
        };
        let (keys, warnings) = resolve_sort_keys(&dataset(), &mapping(), &request);
        assert!(warnings.is_empty());
        assert_eq!(keys[0].column, 2);
    }

    #[test]
    fn canonical_name_uses_mapped_header() {
        let request = SortRequest::parse("-PRICE");
        let (keys, _) = resolve_sort_keys(&dataset(), &mapping(), &request);
        assert_eq!(keys[0].header, "Fee");
        assert!(keys[0].descending);
    }

    #[test]
    fn unresolved_canonical_falls_back_to_header_match() {
        let request = SortRequest::parse("STARS");
        let (keys, _) = resolve_sort_keys(&dataset(), &mapping(), &request);
        assert_eq!(keys[0].header, "Stars");
    }

    #[test]
    fn unknown_key_warns_and_is_skipped() {
        let request = SortRequest::parse("foo,price");
        let (keys, warnings) = resolve_sort_keys(&dataset(), &mapping(), &request);
        assert_eq!(keys.len(), 1);
        assert_eq!(warnings, vec![SortWarning { key: "foo".into() }]);
    }

    #[test]
    fn missing_sorts_lowest() {
        assert_eq!(
            compare_cells(&CellValue::Missing, &CellValue::Number(-5.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::Number(f64::NAN), &CellValue::Missing),
            Ordering::Equal
        );
        assert_eq!(
            compare_cells(&CellValue::Number(2.0), &CellValue::Number(10.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::Text("b".into()), &CellValue::Text("a".into())),
            Ordering::Greater
        );
    }
}
