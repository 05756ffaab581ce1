//! Predicate and sort pipeline for provider rosters.
//!
//! Given a [`Dataset`](tf_model::Dataset), its
//! [`ColumnMapping`](tf_model::ColumnMapping) and a
//! [`FilterRequest`](tf_model::FilterRequest), the pipeline keeps the rows
//! that satisfy every active criterion, applies an optional stable
//! multi-key sort and moves the canonical columns to the front.
//!
//! Criteria on unresolved fields are no-ops, non-numeric cells under a
//! numeric bound count as missing, and unknown sort keys become warnings.
//! All functions here are pure and infallible.

#![deny(unsafe_code)]

pub mod coerce;
pub mod order;
pub mod pipeline;
pub mod predicate;
pub mod sort;

pub use coerce::{NumericCoercion, coerce_numeric, is_truthy, parse_numeric};
pub use order::output_column_order;
pub use pipeline::{
    FilterOptions, FilterPipeline, PipelineOutcome, filter_dataset, run_pipeline, sort_dataset,
};
pub use predicate::{Check, CompiledFilter, check_row};
pub use sort::{ResolvedSortKey, compare_cells, resolve_sort_keys, sort_rows};
