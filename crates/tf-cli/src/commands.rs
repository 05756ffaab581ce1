use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tf_cli::session::{Session, SessionReply};
use tf_filter::{FilterOptions, FilterPipeline, NumericCoercion, PipelineOutcome};
use tf_ingest::{load_dataset, write_csv_file};
use tf_map::{AliasTable, ColumnResolution, ColumnResolver};
use tf_model::{Dataset, FilterRequest, SortRequest, split_list};

use crate::cli::{ColumnsArgs, FilterArgs, InteractiveArgs, RosterArgs};

/// Result of a `filter` run, printed by `main`.
pub struct FilterRun {
    pub outcome: PipelineOutcome,
    /// Set when the rows went to a CSV file.
    pub written: Option<PathBuf>,
    pub limit: usize,
}

/// Loads the roster and resolves its columns.
fn load_roster(args: &RosterArgs) -> Result<(Dataset, ColumnResolution)> {
    let dataset = load_dataset(&args.input)?;
    let table = match &args.aliases {
        Some(path) => AliasTable::load_overlay(path)?,
        None => AliasTable::builtin(),
    };
    let resolution = ColumnResolver::new(table).resolve(&dataset.headers);
    info!(
        mapped = resolution.mapping.len(),
        unmapped = resolution.unmapped_headers.len(),
        "columns resolved"
    );
    Ok((dataset, resolution))
}

fn filter_options(strict_numeric: bool) -> FilterOptions {
    let numeric = if strict_numeric {
        NumericCoercion::Strict
    } else {
        NumericCoercion::Lenient
    };
    FilterOptions::default().with_numeric(numeric)
}

fn list_arg(value: Option<&String>) -> Vec<String> {
    value.map(|raw| split_list(raw)).unwrap_or_default()
}

fn build_request(args: &FilterArgs) -> FilterRequest {
    FilterRequest {
        city: args.city.clone(),
        neighborhood: args.neighborhood.clone(),
        gender: args.gender.clone(),
        price_min: args.price_min,
        price_max: args.price_max,
        rating_min: args.rating_min,
        reviews_min: args.reviews_min,
        years_min: args.years_min,
        mobile: args.mobile,
        modalities: list_arg(args.modalities.as_ref()),
        languages: list_arg(args.languages.as_ref()),
        available: list_arg(args.available.as_ref()),
        text: list_arg(args.text.as_ref()),
    }
}

pub fn run_filter(args: &FilterArgs) -> Result<FilterRun> {
    let span = info_span!("filter", input = %args.roster.input.display());
    let _guard = span.enter();
    let (dataset, resolution) = load_roster(&args.roster)?;
    let request = build_request(args);
    let sort = args.sort.as_deref().map(SortRequest::parse);
    let outcome = FilterPipeline::new(&resolution.mapping)
        .with_options(filter_options(args.strict_numeric))
        .run(&dataset, &request, sort.as_ref());
    if let Some(path) = &args.output {
        write_csv_file(&outcome.dataset, path)
            .with_context(|| format!("write results to {}", path.display()))?;
    }
    Ok(FilterRun {
        outcome,
        written: args.output.clone(),
        limit: args.limit,
    })
}

pub fn run_columns(args: &ColumnsArgs) -> Result<ColumnResolution> {
    let (_, resolution) = load_roster(&args.roster)?;
    Ok(resolution)
}

pub fn run_interactive(args: &InteractiveArgs) -> Result<()> {
    let (dataset, resolution) = load_roster(&args.roster)?;
    let mut session = Session::new(dataset, resolution)
        .with_options(filter_options(args.strict_numeric))
        .with_limit(args.limit);
    println!("{}", session.banner());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        print!("> ");
        stdout.flush().context("flush prompt")?;
        line.clear();
        if stdin.lock().read_line(&mut line).context("read command")? == 0 {
            break;
        }
        match session.apply(&line) {
            SessionReply::Continue(text) => {
                if !text.is_empty() {
                    println!("{text}");
                }
            }
            SessionReply::Quit => break,
        }
    }
    Ok(())
}
