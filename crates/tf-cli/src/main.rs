//! Therapist finder CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tf_cli::logging::{LogConfig, LogFormat, init_logging};
use tf_cli::summary::{render_mapping, render_results, warning_line};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{FilterRun, run_columns, run_filter, run_interactive};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Filter(args) => run_filter(args).map(|run| print_filter_run(&run)),
        Command::Columns(args) => {
            run_columns(args).map(|resolution| println!("{}", render_mapping(&resolution)))
        }
        Command::Interactive(args) => run_interactive(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn print_filter_run(run: &FilterRun) {
    for warning in &run.outcome.warnings {
        eprintln!("{}", warning_line(warning));
    }
    match &run.written {
        Some(path) => println!(
            "Wrote {} rows to {}",
            run.outcome.matched_rows(),
            path.display()
        ),
        None => println!("{}", render_results(&run.outcome, run.limit)),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
