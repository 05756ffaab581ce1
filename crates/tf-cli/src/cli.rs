//! CLI argument definitions for the therapist finder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "therapist-finder",
    version,
    about = "Filter and sort a roster of service providers",
    long_about = "Filter and sort a roster of service providers (massage therapists and similar).\n\n\
                  Column names are matched to known fields through alias lists, so rosters\n\
                  with headers like 'Town', 'Fee' or 'Therapist' work without configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter, sort and print or export a roster.
    Filter(FilterArgs),

    /// Show how the roster's columns map to known fields.
    Columns(ColumnsArgs),

    /// Refine filters line by line against a loaded roster.
    Interactive(InteractiveArgs),
}

/// Options shared by every subcommand that loads a roster.
#[derive(Args)]
pub struct RosterArgs {
    /// Roster file (.csv, .xlsx, .xlsm, .xlsb, .xls or .ods).
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// JSON file with extra column aliases, e.g. {"price": ["tarif"]}.
    #[arg(long = "aliases", value_name = "PATH")]
    pub aliases: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FilterArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    /// Write the result as CSV instead of printing it.
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exact city (case-insensitive).
    #[arg(long)]
    pub city: Option<String>,

    /// Text contained in the neighborhood.
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// Exact gender (case-insensitive).
    #[arg(long)]
    pub gender: Option<String>,

    /// Modalities the provider must offer (comma or semicolon separated).
    #[arg(long, value_name = "LIST")]
    pub modalities: Option<String>,

    /// Languages the provider must all speak (comma or semicolon separated).
    #[arg(long, value_name = "LIST")]
    pub languages: Option<String>,

    /// Minimum price.
    #[arg(long = "price-min", value_name = "N")]
    pub price_min: Option<f64>,

    /// Maximum price.
    #[arg(long = "price-max", value_name = "N")]
    pub price_max: Option<f64>,

    /// Minimum rating.
    #[arg(long = "rating-min", value_name = "N")]
    pub rating_min: Option<f64>,

    /// Minimum number of reviews.
    #[arg(long = "reviews-min", value_name = "N")]
    pub reviews_min: Option<u64>,

    /// Minimum years of experience.
    #[arg(long = "years-min", value_name = "N")]
    pub years_min: Option<f64>,

    /// Only providers offering mobile (in-home) service.
    #[arg(long)]
    pub mobile: bool,

    /// Keywords that must all appear in bio or credentials.
    #[arg(long, value_name = "LIST")]
    pub text: Option<String>,

    /// Days or times, any of which is enough (e.g. "Sat,Sun").
    #[arg(long, value_name = "LIST")]
    pub available: Option<String>,

    /// Sort keys, e.g. "price,-rating" (leading '-' sorts descending).
    #[arg(long, value_name = "KEYS", allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Rows to print when no --out is given.
    #[arg(long, default_value_t = 30)]
    pub limit: usize,

    /// Only plain numbers satisfy numeric bounds ("$100" no longer counts).
    #[arg(long = "strict-numeric")]
    pub strict_numeric: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub roster: RosterArgs,
}

#[derive(Parser)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    /// Rows to print for `show`.
    #[arg(long, default_value_t = 30)]
    pub limit: usize,

    /// Only plain numbers satisfy numeric bounds.
    #[arg(long = "strict-numeric")]
    pub strict_numeric: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_flags_parse() {
        let cli = Cli::try_parse_from([
            "therapist-finder",
            "filter",
            "--in",
            "roster.csv",
            "--city",
            "Vancouver",
            "--price-max",
            "120",
            "--mobile",
            "--sort",
            "price,-rating",
        ])
        .expect("parse args");
        let Command::Filter(args) = cli.command else {
            panic!("expected filter command");
        };
        assert_eq!(args.roster.input, PathBuf::from("roster.csv"));
        assert_eq!(args.city.as_deref(), Some("Vancouver"));
        assert_eq!(args.price_max, Some(120.0));
        assert!(args.mobile);
        assert_eq!(args.limit, 30);
        assert!(!args.strict_numeric);
    }

    #[test]
    fn descending_sort_value_is_not_a_flag() {
        let cli = Cli::try_parse_from([
            "therapist-finder",
            "filter",
            "--in",
            "roster.csv",
            "--sort",
            "-rating",
        ])
        .expect("parse args");
        let Command::Filter(args) = cli.command else {
            panic!("expected filter command");
        };
        assert_eq!(args.sort.as_deref(), Some("-rating"));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["therapist-finder", "columns"]).is_err());
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
