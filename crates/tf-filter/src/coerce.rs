//! Cell coercion rules used by numeric bounds and the mobile-service flag.

use serde::{Deserialize, Serialize};
use tf_model::CellValue;

/// How numeric criteria read cells stored as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumericCoercion {
    /// Plain trimmed parse only (`"$100"` is missing).
    Strict,
    /// Retry on the text's only run of digits, `,` and `.`
    /// (`"$100"` is 100; `"N/A"` and `"4.8/5"` are missing).
    #[default]
    Lenient,
}

const TRUTHY: [&str; 4] = ["true", "yes", "y", "1"];

/// Reads a cell as a number; `None` means missing.
///
/// Missing cells, unparsable text and NaN all coerce to `None`, never zero.
/// Boolean cells read as 1 or 0.
pub fn coerce_numeric(cell: &CellValue, mode: NumericCoercion) -> Option<f64> {
    let value = match cell {
        CellValue::Number(value) => Some(*value),
        CellValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
        CellValue::Text(text) => parse_numeric(text, mode),
        CellValue::Missing => None,
    };
    value.filter(|v| !v.is_nan())
}

/// Parses numeric text under the given coercion mode.
pub fn parse_numeric(value: &str, mode: NumericCoercion) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return Some(parsed);
    }
    match mode {
        NumericCoercion::Strict => None,
        NumericCoercion::Lenient => match numeric_runs(trimmed).as_slice() {
            [only] => only.parse().ok(),
            _ => None,
        },
    }
}

/// Splits text into its numeric runs, dropping thousands separators.
///
/// A run starts at a digit (taking a `-` right before it) and continues
/// through digits, `,` and `.`.
fn numeric_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut chars = text.chars().peekable();
    let mut previous = None;
    while let Some(ch) = chars.next() {
        if !ch.is_ascii_digit() {
            previous = Some(ch);
            continue;
        }
        let mut run = String::new();
        if previous == Some('-') {
            run.push('-');
        }
        run.push(ch);
        while let Some(&next) = chars.peek() {
            match next {
                '0'..='9' | '.' => run.push(next),
                ',' => {}
                _ => break,
            }
            chars.next();
        }
        previous = run.chars().last();
        runs.push(run);
    }
    runs
}

/// Mobile-service truthiness.
///
/// Text cells are truthy when their lower-case form is one of
/// `true`, `yes`, `y`, `1`; boolean cells are their own value.
/// Numeric flags are truthy when non-zero; missing is never truthy.
pub fn is_truthy(cell: &CellValue) -> bool {
    match cell {
        CellValue::Text(text) => {
            let lowered = text.trim().to_lowercase();
            TRUTHY.contains(&lowered.as_str())
        }
        CellValue::Bool(value) => *value,
        CellValue::Number(value) => *value != 0.0 && !value.is_nan(),
        CellValue::Missing => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_parse_in_both_modes() {
        for mode in [NumericCoercion::Strict, NumericCoercion::Lenient] {
            assert_eq!(parse_numeric(" 120 ", mode), Some(120.0));
            assert_eq!(parse_numeric("4.75", mode), Some(4.75));
            assert_eq!(parse_numeric("-3", mode), Some(-3.0));
        }
    }

    #[test]
    fn empty_and_placeholder_text_is_missing() {
        for mode in [NumericCoercion::Strict, NumericCoercion::Lenient] {
            assert_eq!(parse_numeric("", mode), None);
            assert_eq!(parse_numeric("N/A", mode), None);
            assert_eq!(parse_numeric("call", mode), None);
        }
    }

    #[test]
    fn lenient_strips_currency_and_separators() {
        let mode = NumericCoercion::Lenient;
        assert_eq!(parse_numeric("$100", mode), Some(100.0));
        assert_eq!(parse_numeric("1,250", mode), Some(1250.0));
        assert_eq!(parse_numeric("4.8 stars", mode), Some(4.8));
        assert_eq!(parse_numeric("10-20", mode), None);
        assert_eq!(parse_numeric("$1,250.00 CAD", mode), Some(1250.0));
    }

    #[test]
    fn lenient_rejects_several_numbers() {
        let mode = NumericCoercion::Lenient;
        assert_eq!(parse_numeric("4.8/5", mode), None);
        assert_eq!(parse_numeric("$80 / 60 min", mode), None);
        assert_eq!(parse_numeric("price: -5", mode), Some(-5.0));
    }

    #[test]
    fn strict_rejects_decorated_numbers() {
        assert_eq!(parse_numeric("$100", NumericCoercion::Strict), None);
    }

    #[test]
    fn nan_coerces_to_missing() {
        let mode = NumericCoercion::Lenient;
        assert_eq!(coerce_numeric(&CellValue::Number(f64::NAN), mode), None);
        assert_eq!(coerce_numeric(&CellValue::text("NaN"), mode), None);
        assert_eq!(coerce_numeric(&CellValue::Missing, mode), None);
        assert_eq!(coerce_numeric(&CellValue::Bool(true), mode), Some(1.0));
    }

    #[test]
    fn truthy_rule_has_two_branches() {
        assert!(is_truthy(&CellValue::text("Yes")));
        assert!(is_truthy(&CellValue::text("Y")));
        assert!(is_truthy(&CellValue::text("TRUE")));
        assert!(is_truthy(&CellValue::text("1")));
        assert!(!is_truthy(&CellValue::text("No")));
        assert!(!is_truthy(&CellValue::text("sometimes")));
        assert!(is_truthy(&CellValue::Bool(true)));
        assert!(!is_truthy(&CellValue::Bool(false)));
        assert!(!is_truthy(&CellValue::Missing));
        assert!(is_truthy(&CellValue::Number(1.0)));
        assert!(!is_truthy(&CellValue::Number(0.0)));
    }
}
