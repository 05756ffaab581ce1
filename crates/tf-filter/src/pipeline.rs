//! Filter, sort and reorder in one pass.

use serde::{Deserialize, Serialize};
use tf_model::{ColumnMapping, Criterion, Dataset, FilterRequest, SortRequest, SortWarning};
use tracing::{debug, info, info_span};

use crate::coerce::NumericCoercion;
use crate::order::output_column_order;
use crate::predicate::CompiledFilter;
use crate::sort::{ResolvedSortKey, resolve_sort_keys, sort_rows};

/// Options controlling predicate evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// How numeric bounds read text cells.
    pub numeric: NumericCoercion,
}

impl FilterOptions {
    /// Plain numeric parsing only.
    pub fn strict() -> Self {
        Self {
            numeric: NumericCoercion::Strict,
        }
    }

    pub fn with_numeric(mut self, numeric: NumericCoercion) -> Self {
        self.numeric = numeric;
        self
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    /// Matching rows, sorted and with columns reordered.
    pub dataset: Dataset,
    /// One entry per sort key that matched nothing.
    pub warnings: Vec<SortWarning>,
    /// Header order of `dataset`.
    pub column_order: Vec<String>,
    /// Sort keys actually applied, most significant first.
    pub sort_keys: Vec<ResolvedSortKey>,
    /// Active criteria that were ignored because their field is unresolved.
    pub skipped: Vec<Criterion>,
    /// Row count before filtering.
    pub total_rows: usize,
}

impl PipelineOutcome {
    pub fn matched_rows(&self) -> usize {
        self.dataset.len()
    }
}

/// Keeps the rows that satisfy every active criterion, in input order.
///
/// Returns the filtered dataset and the criteria skipped for lack of a column.
pub fn filter_dataset(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    request: &FilterRequest,
    options: &FilterOptions,
) -> (Dataset, Vec<Criterion>) {
    let compiled = CompiledFilter::compile(dataset, mapping, request, options.numeric);
    let rows = dataset
        .rows
        .iter()
        .filter(|row| compiled.matches(row))
        .cloned()
        .collect();
    let filtered = Dataset {
        headers: dataset.headers.clone(),
        rows,
    };
    (filtered, compiled.skipped)
}

/// Sorts `dataset` in place; returns the applied keys and the warnings.
pub fn sort_dataset(
    dataset: &mut Dataset,
    mapping: &ColumnMapping,
    request: &SortRequest,
) -> (Vec<ResolvedSortKey>, Vec<SortWarning>) {
    let (keys, warnings) = resolve_sort_keys(dataset, mapping, request);
    sort_rows(&mut dataset.rows, &keys);
    (keys, warnings)
}

/// Runs filter, sort and column reordering over a mapped dataset.
#[derive(Debug, Clone)]
pub struct FilterPipeline<'a> {
    mapping: &'a ColumnMapping,
    options: FilterOptions,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(mapping: &'a ColumnMapping) -> Self {
        Self {
            mapping,
            options: FilterOptions::default(),
        }
    }

    /// Sets the filter options.
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// One complete run. Nothing is carried over between calls.
    pub fn run(
        &self,
        dataset: &Dataset,
        request: &FilterRequest,
        sort: Option<&SortRequest>,
    ) -> PipelineOutcome {
        let span = info_span!("pipeline", rows = dataset.len());
        let _guard = span.enter();

        let (mut filtered, skipped) = filter_dataset(dataset, self.mapping, request, &self.options);
        debug!(
            active = request.active_criteria().len(),
            skipped = skipped.len(),
            "filters applied"
        );

        let (sort_keys, warnings) = match sort {
            Some(sort) if !sort.is_empty() => sort_dataset(&mut filtered, self.mapping, sort),
            _ => (Vec::new(), Vec::new()),
        };

        let column_order = output_column_order(&filtered.headers, self.mapping);
        let dataset_out = filtered.select_columns(&column_order);
        info!(
            matched = dataset_out.len(),
            total = dataset.len(),
            "pipeline complete"
        );
        PipelineOutcome {
            dataset: dataset_out,
            warnings,
            column_order,
            sort_keys,
            skipped,
            total_rows: dataset.len(),
        }
    }
}

/// Convenience wrapper over [`FilterPipeline::run`].
pub fn run_pipeline(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    request: &FilterRequest,
    sort: Option<&SortRequest>,
    options: &FilterOptions,
) -> PipelineOutcome {
    FilterPipeline::new(mapping)
        .with_options(*options)
        .run(dataset, request, sort)
}
