//! Line-oriented interactive filtering.
//!
//! A [`Session`] owns one loaded roster and the current criteria. Every
//! command that changes the criteria reruns the whole pipeline from the
//! original rows; nothing is cached between runs except the latest outcome,
//! which `show` and `download` read.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tf_filter::{FilterOptions, FilterPipeline, PipelineOutcome};
use tf_ingest::write_csv_file;
use tf_map::ColumnResolution;
use tf_model::{CanonicalField, Criterion, Dataset, FilterRequest, SortRequest, split_list};
use tracing::debug;

use crate::summary::{match_line, render_mapping, render_results, warning_line};

/// File written by `download` when no path is given.
pub const DEFAULT_DOWNLOAD: &str = "filtered_candidates.csv";

const HELP: &str = "\
Commands:
  set <filter> <value>   set a filter (also: <filter>=<value>)
  clear <filter>         remove one filter
  reset                  remove all filters and the sort
  show                   print the current matches
  filters                list active filters
  columns                show how columns map to fields
  download [path]        save matches as CSV (default filtered_candidates.csv)
  help                   this text
  quit | exit            leave

Filters: city, neighborhood, gender, modalities, languages, price-min,
price-max, rating-min, reviews-min, years-min, mobile (yes/no), text,
available, sort (e.g. price,-rating)";

/// What the caller should do after one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// Print the text (possibly empty) and read the next line.
    Continue(String),
    Quit,
}

/// Something `set` and `clear` can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    Filter(Criterion),
    Sort,
}

impl Setting {
    fn parse(name: &str) -> Result<Self> {
        if name.trim().eq_ignore_ascii_case("sort") {
            return Ok(Self::Sort);
        }
        name.parse::<Criterion>()
            .map(Self::Filter)
            .map_err(|message| anyhow!(message))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Set(Setting, String),
    Clear(Setting),
    Reset,
    Show,
    Filters,
    Columns,
    Download(Option<PathBuf>),
    Help,
    Quit,
    Nothing,
}

fn parse_command(line: &str) -> Result<SessionCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(SessionCommand::Nothing);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_lowercase().as_str() {
        "set" => {
            let (name, value) = split_assignment(rest)
                .ok_or_else(|| anyhow!("usage: set <filter> <value>"))?;
            SessionCommand::Set(Setting::parse(name)?, value.to_string())
        }
        "clear" | "unset" => {
            if rest.is_empty() {
                bail!("usage: clear <filter>");
            }
            SessionCommand::Clear(Setting::parse(rest)?)
        }
        "reset" => SessionCommand::Reset,
        "show" | "results" => SessionCommand::Show,
        "filters" => SessionCommand::Filters,
        "columns" => SessionCommand::Columns,
        "download" | "save" => {
            SessionCommand::Download((!rest.is_empty()).then(|| PathBuf::from(rest)))
        }
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        _ => match line.split_once('=') {
            Some((name, value)) => {
                SessionCommand::Set(Setting::parse(name)?, value.trim().to_string())
            }
            None => bail!("unknown command '{word}' (type 'help')"),
        },
    };
    Ok(command)
}

/// Splits `name value` or `name=value`.
fn split_assignment(text: &str) -> Option<(&str, &str)> {
    if let Some((name, value)) = text.split_once('=') {
        return Some((name.trim(), value.trim()));
    }
    let (name, value) = text.split_once(char::is_whitespace)?;
    Some((name.trim(), value.trim()))
}

fn parse_bound(criterion: Criterion, value: &str) -> Result<f64> {
    let number: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("{criterion} needs a number, got '{value}'"))?;
    if !number.is_finite() {
        bail!("{criterion} needs a finite number, got '{value}'");
    }
    Ok(number)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on" => Ok(true),
        "no" | "n" | "false" | "0" | "off" => Ok(false),
        _ => bail!("mobile takes yes or no, got '{value}'"),
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Updates one criterion from user text.
pub fn set_criterion(request: &mut FilterRequest, criterion: Criterion, value: &str) -> Result<()> {
    match criterion {
        Criterion::City => request.city = optional_text(value),
        Criterion::Neighborhood => request.neighborhood = optional_text(value),
        Criterion::Gender => request.gender = optional_text(value),
        Criterion::PriceMin => request.price_min = Some(parse_bound(criterion, value)?),
        Criterion::PriceMax => request.price_max = Some(parse_bound(criterion, value)?),
        Criterion::RatingMin => request.rating_min = Some(parse_bound(criterion, value)?),
        Criterion::YearsMin => request.years_min = Some(parse_bound(criterion, value)?),
        Criterion::ReviewsMin => {
            let count = value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{criterion} needs a whole number, got '{value}'"))?;
            request.reviews_min = Some(count);
        }
        Criterion::Mobile => request.mobile = parse_flag(value)?,
        Criterion::Modalities => request.modalities = split_list(value),
        Criterion::Languages => request.languages = split_list(value),
        Criterion::Available => request.available = split_list(value),
        Criterion::Text => request.text = split_list(value),
    }
    Ok(())
}

/// Interactive state over one roster.
pub struct Session {
    dataset: Dataset,
    resolution: ColumnResolution,
    request: FilterRequest,
    sort: SortRequest,
    options: FilterOptions,
    limit: usize,
    outcome: PipelineOutcome,
}

impl Session {
    pub fn new(dataset: Dataset, resolution: ColumnResolution) -> Self {
        let options = FilterOptions::default();
        let request = FilterRequest::default();
        let sort = SortRequest::default();
        let outcome = FilterPipeline::new(&resolution.mapping)
            .with_options(options)
            .run(&dataset, &request, None);
        Self {
            dataset,
            resolution,
            request,
            sort,
            options,
            limit: 30,
            outcome,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self.rerun();
        self
    }

    /// Rows printed by `show`.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn request(&self) -> &FilterRequest {
        &self.request
    }

    pub fn sort(&self) -> &SortRequest {
        &self.sort
    }

    /// Result of the latest run.
    pub fn outcome(&self) -> &PipelineOutcome {
        &self.outcome
    }

    /// One-line summary printed when the session starts.
    pub fn banner(&self) -> String {
        format!(
            "Loaded {} candidates ({} of {} fields mapped). Type 'help' for commands.",
            self.dataset.len(),
            self.resolution.mapping.len(),
            CanonicalField::ALL.len()
        )
    }

    /// Handles one input line. Errors are reported in the reply text and
    /// leave the state untouched.
    pub fn apply(&mut self, line: &str) -> SessionReply {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(error) => return SessionReply::Continue(format!("error: {error:#}")),
        };
        if command == SessionCommand::Quit {
            return SessionReply::Quit;
        }
        match self.execute(command) {
            Ok(text) => SessionReply::Continue(text),
            Err(error) => SessionReply::Continue(format!("error: {error:#}")),
        }
    }

    fn execute(&mut self, command: SessionCommand) -> Result<String> {
        debug!(?command, "session command");
        match command {
            SessionCommand::Set(Setting::Sort, value) => {
                self.sort = SortRequest::parse(&value);
                Ok(self.rerun())
            }
            SessionCommand::Set(Setting::Filter(criterion), value) => {
                let mut request = self.request.clone();
                set_criterion(&mut request, criterion, &value)?;
                self.request = request;
                Ok(self.rerun())
            }
            SessionCommand::Clear(Setting::Sort) => {
                self.sort = SortRequest::default();
                Ok(self.rerun())
            }
            SessionCommand::Clear(Setting::Filter(criterion)) => {
                self.request.clear(criterion);
                Ok(self.rerun())
            }
            SessionCommand::Reset => {
                self.request = FilterRequest::default();
                self.sort = SortRequest::default();
                Ok(self.rerun())
            }
            SessionCommand::Show => {
                self.rerun();
                Ok(render_results(&self.outcome, self.limit))
            }
            SessionCommand::Filters => Ok(self.describe_filters()),
            SessionCommand::Columns => Ok(render_mapping(&self.resolution)),
            SessionCommand::Download(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD));
                self.download(&path)
            }
            SessionCommand::Help => Ok(HELP.to_string()),
            SessionCommand::Nothing | SessionCommand::Quit => Ok(String::new()),
        }
    }

    /// Reruns the pipeline from the loaded rows; returns warnings and the match line.
    fn rerun(&mut self) -> String {
        let sort = (!self.sort.is_empty()).then_some(&self.sort);
        self.outcome = FilterPipeline::new(&self.resolution.mapping)
            .with_options(self.options)
            .run(&self.dataset, &self.request, sort);
        let mut lines: Vec<String> = self.outcome.warnings.iter().map(warning_line).collect();
        lines.push(match_line(&self.outcome));
        lines.join("\n")
    }

    fn describe_filters(&self) -> String {
        let mut lines: Vec<String> = self
            .request
            .active_criteria()
            .into_iter()
            .filter_map(|criterion| {
                self.request
                    .describe(criterion)
                    .map(|value| format!("{criterion} = {value}"))
            })
            .collect();
        if !self.sort.is_empty() {
            lines.push(format!("sort = {}", self.sort));
        }
        if lines.is_empty() {
            return "No filters active.".to_string();
        }
        for criterion in &self.outcome.skipped {
            lines.push(format!("({criterion} ignored: no matching column)"));
        }
        lines.join("\n")
    }

    fn download(&self, path: &Path) -> Result<String> {
        write_csv_file(&self.outcome.dataset, path)?;
        Ok(format!(
            "Wrote {} rows to {}",
            self.outcome.matched_rows(),
            path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_set_forms() {
        assert_eq!(
            parse_command("set city Vancouver").expect("parse"),
            SessionCommand::Set(Setting::Filter(Criterion::City), "Vancouver".to_string())
        );
        assert_eq!(
            parse_command("price_max = 120").expect("parse"),
            SessionCommand::Set(Setting::Filter(Criterion::PriceMax), "120".to_string())
        );
        assert_eq!(
            parse_command("set sort price,-rating").expect("parse"),
            SessionCommand::Set(Setting::Sort, "price,-rating".to_string())
        );
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("  ").expect("parse"), SessionCommand::Nothing);
        assert_eq!(parse_command("EXIT").expect("parse"), SessionCommand::Quit);
        assert_eq!(
            parse_command("download out.csv").expect("parse"),
            SessionCommand::Download(Some(PathBuf::from("out.csv")))
        );
        assert_eq!(
            parse_command("download").expect("parse"),
            SessionCommand::Download(None)
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("set colour red").is_err());
        assert!(parse_command("set city").is_err());
        assert!(parse_command("clear").is_err());
    }

    #[test]
    fn criterion_values_are_checked() {
        let mut request = FilterRequest::default();
        set_criterion(&mut request, Criterion::Mobile, "Yes").expect("mobile");
        assert!(request.mobile);
        set_criterion(&mut request, Criterion::Modalities, "Deep Tissue; Sports").expect("list");
        assert_eq!(request.modalities, vec!["Deep Tissue", "Sports"]);
        assert!(set_criterion(&mut request, Criterion::PriceMax, "cheap").is_err());
        assert!(set_criterion(&mut request, Criterion::ReviewsMin, "2.5").is_err());
        assert!(set_criterion(&mut request, Criterion::Mobile, "maybe").is_err());
        assert_eq!(request.price_max, None);
    }
}
