//! Per-column cell typing.
//!
//! A column is numeric when every non-missing value parses as a number,
//! boolean when every non-missing value is `true`/`false` in any casing,
//! and text otherwise.

use tf_model::CellValue;

/// Values read as missing regardless of column type.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Inferred storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Bool,
    Text,
}

pub fn is_na(value: &str) -> bool {
    NA_VALUES.contains(&value.trim())
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Picks the kind of one column from its raw values.
pub fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut numeric = true;
    let mut boolean = true;
    let mut any = false;
    for value in values {
        let trimmed = value.trim();
        if is_na(trimmed) {
            continue;
        }
        any = true;
        numeric &= trimmed.parse::<f64>().is_ok();
        boolean &= parse_bool(trimmed).is_some();
        if !numeric && !boolean {
            return ColumnKind::Text;
        }
    }
    if !any {
        ColumnKind::Text
    } else if numeric {
        ColumnKind::Number
    } else {
        ColumnKind::Bool
    }
}

/// Converts one raw value according to its column kind.
pub fn to_cell(value: &str, kind: ColumnKind) -> CellValue {
    let trimmed = value.trim();
    if is_na(trimmed) {
        return CellValue::Missing;
    }
    match kind {
        ColumnKind::Number => trimmed
            .parse::<f64>()
            .map_or(CellValue::Missing, CellValue::Number),
        ColumnKind::Bool => parse_bool(trimmed).map_or(CellValue::Missing, CellValue::Bool),
        ColumnKind::Text => CellValue::Text(trimmed.to_string()),
    }
}

/// Types a rectangular table of raw strings column by column.
pub fn type_rows(width: usize, rows: &[Vec<String>]) -> Vec<Vec<CellValue>> {
    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| {
            infer_kind(
                rows.iter()
                    .map(|row| row.get(col).map(String::as_str).unwrap_or("")),
            )
        })
        .collect();
    rows.iter()
        .map(|row| {
            kinds
                .iter()
                .enumerate()
                .map(|(col, kind)| to_cell(row.get(col).map(String::as_str).unwrap_or(""), *kind))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_columns_ignore_na_markers() {
        assert_eq!(
            infer_kind(["100", "N/A", "", "89.5"].into_iter()),
            ColumnKind::Number
        );
        assert_eq!(to_cell("N/A", ColumnKind::Number), CellValue::Missing);
        assert_eq!(to_cell(" 89.5 ", ColumnKind::Number), CellValue::Number(89.5));
    }

    #[test]
    fn boolean_columns_accept_any_casing() {
        assert_eq!(
            infer_kind(["TRUE", "false", "True"].into_iter()),
            ColumnKind::Bool
        );
        assert_eq!(to_cell("FALSE", ColumnKind::Bool), CellValue::Bool(false));
    }

    #[test]
    fn yes_no_stays_text() {
        assert_eq!(infer_kind(["Yes", "No"].into_iter()), ColumnKind::Text);
        assert_eq!(infer_kind(["$100", "90"].into_iter()), ColumnKind::Text);
    }

    #[test]
    fn all_missing_column_is_text() {
        assert_eq!(infer_kind(["", "NA"].into_iter()), ColumnKind::Text);
    }

    #[test]
    fn type_rows_pads_short_rows() {
        let rows = vec![
            vec!["Ana".to_string(), "100".to_string()],
            vec!["Ben".to_string()],
        ];
        let typed = type_rows(2, &rows);
        assert_eq!(typed[0][1], CellValue::Number(100.0));
        assert_eq!(typed[1][1], CellValue::Missing);
    }
}
