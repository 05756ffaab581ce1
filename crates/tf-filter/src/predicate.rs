//! Row predicates compiled from a filter request.
//!
//! Each active criterion becomes one [`Check`] bound to the column index of
//! its canonical field. Criteria whose field is unresolved compile to nothing
//! and are reported as skipped.

use tf_model::{CanonicalField, ColumnMapping, Criterion, Dataset, FilterRequest, Record};
use tracing::debug;

use crate::coerce::{NumericCoercion, coerce_numeric, is_truthy};

/// A single row test.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Case-insensitive exact match on the trimmed cell text.
    Equals { column: usize, needle: String },
    /// Case-insensitive substring match.
    Contains { column: usize, needle: String },
    /// Numeric `>=`; missing values fail.
    AtLeast { column: usize, bound: f64 },
    /// Numeric `<=`; missing values fail.
    AtMost { column: usize, bound: f64 },
    /// Mobile-service truthiness.
    Truthy { column: usize },
    /// Every token is a case-insensitive substring of the cell.
    AllTokens { column: usize, tokens: Vec<String> },
    /// At least one token is a case-insensitive substring of the cell.
    AnyToken { column: usize, tokens: Vec<String> },
    /// Every token is a substring of the listed cells joined by spaces.
    AllTokensAcross {
        columns: Vec<usize>,
        tokens: Vec<String>,
    },
}

/// Active checks for one dataset plus the criteria that could not apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledFilter {
    pub checks: Vec<(Criterion, Check)>,
    pub skipped: Vec<Criterion>,
    pub numeric: NumericCoercion,
}

impl CompiledFilter {
    /// Binds the active criteria of `request` to `dataset`'s columns.
    pub fn compile(
        dataset: &Dataset,
        mapping: &ColumnMapping,
        request: &FilterRequest,
        numeric: NumericCoercion,
    ) -> Self {
        let column_of = |field: CanonicalField| {
            mapping
                .get(field)
                .and_then(|header| dataset.column_index(header))
        };

        let mut compiled = CompiledFilter {
            numeric,
            ..CompiledFilter::default()
        };
        for criterion in request.active_criteria() {
            let check = match criterion {
                Criterion::Text => {
                    let columns: Vec<usize> =
                        criterion.fields().iter().filter_map(|f| column_of(*f)).collect();
                    (!columns.is_empty()).then(|| Check::AllTokensAcross {
                        columns,
                        tokens: lowered_tokens(&request.text),
                    })
                }
                _ => criterion
                    .fields()
                    .first()
                    .and_then(|field| column_of(*field))
                    .map(|column| single_column_check(criterion, column, request)),
            };
            match check {
                Some(check) => compiled.checks.push((criterion, check)),
                None => {
                    debug!(criterion = %criterion, "field unresolved, criterion skipped");
                    compiled.skipped.push(criterion);
                }
            }
        }
        compiled
    }

    /// True when the row passes every check.
    pub fn matches(&self, row: &Record) -> bool {
        self.checks
            .iter()
            .all(|(_, check)| check_row(check, row, self.numeric))
    }
}

fn single_column_check(criterion: Criterion, column: usize, request: &FilterRequest) -> Check {
    let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_lowercase();
    match criterion {
        Criterion::City => Check::Equals {
            column,
            needle: text(&request.city),
        },
        Criterion::Gender => Check::Equals {
            column,
            needle: text(&request.gender),
        },
        Criterion::Neighborhood => Check::Contains {
            column,
            needle: text(&request.neighborhood),
        },
        Criterion::PriceMin => Check::AtLeast {
            column,
            bound: request.price_min.unwrap_or_default(),
        },
        Criterion::PriceMax => Check::AtMost {
            column,
            bound: request.price_max.unwrap_or_default(),
        },
        Criterion::RatingMin => Check::AtLeast {
            column,
            bound: request.rating_min.unwrap_or_default(),
        },
        Criterion::ReviewsMin => Check::AtLeast {
            column,
            bound: request.reviews_min.unwrap_or_default() as f64,
        },
        Criterion::YearsMin => Check::AtLeast {
            column,
            bound: request.years_min.unwrap_or_default(),
        },
        Criterion::Mobile => Check::Truthy { column },
        Criterion::Modalities => Check::AllTokens {
            column,
            tokens: lowered_tokens(&request.modalities),
        },
        Criterion::Languages => Check::AllTokens {
            column,
            tokens: lowered_tokens(&request.languages),
        },
        Criterion::Available => Check::AnyToken {
            column,
            tokens: lowered_tokens(&request.available),
        },
        Criterion::Text => Check::AllTokensAcross {
            columns: vec![column],
            tokens: lowered_tokens(&request.text),
        },
    }
}

fn lowered_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Evaluates one check against one row.
pub fn check_row(check: &Check, row: &Record, numeric: NumericCoercion) -> bool {
    match check {
        Check::Equals { column, needle } => {
            let cell = row.get(*column);
            !cell.is_missing() && cell.as_text().trim().to_lowercase() == *needle
        }
        Check::Contains { column, needle } => {
            let cell = row.get(*column);
            !cell.is_missing() && cell.as_text().to_lowercase().contains(needle.as_str())
        }
        Check::AtLeast { column, bound } => {
            coerce_numeric(row.get(*column), numeric).is_some_and(|value| value >= *bound)
        }
        Check::AtMost { column, bound } => {
            coerce_numeric(row.get(*column), numeric).is_some_and(|value| value <= *bound)
        }
        Check::Truthy { column } => is_truthy(row.get(*column)),
        Check::AllTokens { column, tokens } => {
            let haystack = row.get(*column).as_text().to_lowercase();
            tokens.iter().all(|token| haystack.contains(token.as_str()))
        }
        Check::AnyToken { column, tokens } => {
            let haystack = row.get(*column).as_text().to_lowercase();
            tokens.iter().any(|token| haystack.contains(token.as_str()))
        }
        Check::AllTokensAcross { columns, tokens } => {
            let haystack = columns
                .iter()
                .map(|column| row.get(*column).as_text().to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            tokens.iter().all(|token| haystack.contains(token.as_str()))
        }
    }
}
