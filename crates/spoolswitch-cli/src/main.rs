// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// spoolswitch — print a text file through the desktop print pathway.
//
// Entry point. Initialises logging, loads the dispatch config, reads the job
// file and hands it to the dispatcher with the native platform bridge.

mod input;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use spoolswitch_bridge::platform_bridge;
use spoolswitch_core::config::{self, DispatchConfig};
use spoolswitch_core::error::Result;
use spoolswitch_core::human_errors::humanize_error;
use spoolswitch_core::types::DispatchReport;
use spoolswitch_print::PrintDispatcher;

#[derive(Parser, Debug)]
#[command(
    name = "spoolswitch",
    version,
    about = "Print a UTF-8 text file on the default printer",
    long_about = "Print a UTF-8 text file on the default printer.\n\n\
                  If the first line reads `::PRINTER::<name>`, that printer is made the \
                  default for the duration of the job and the line is not printed."
)]
struct Cli {
    /// Text file to print
    file: Option<PathBuf>,

    /// Use this config file instead of config.json in the data directory
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(file) = cli.file else {
        Cli::command().print_help().ok();
        return ExitCode::from(2);
    };

    if !file.exists() {
        eprintln!("File not found: {}", file.display());
        return ExitCode::FAILURE;
    }

    match run(&file, cli.config.as_deref()) {
        Ok(report) => {
            tracing::info!(
                job = %report.job_id,
                attempts = report.attempts,
                printer = report.target_printer.as_deref().unwrap_or("(default)"),
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let human = humanize_error(&e);
            tracing::error!(error = %e, severity = ?human.severity, "an error occurred during printing");
            eprintln!("{human}");
            ExitCode::FAILURE
        }
    }
}

fn run(file: &Path, config_path: Option<&Path>) -> Result<DispatchReport> {
    let config = match config_path {
        Some(path) => {
            let mut config = DispatchConfig::load_from(path)?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => DispatchConfig::load(&config::data_dir()),
    };

    let text = input::read_job(file)?;
    tracing::info!(file = %file.display(), "processing file");

    let bridge = platform_bridge();
    tracing::debug!(platform = bridge.platform_name(), "print bridge selected");

    let dispatcher = PrintDispatcher::from_config(bridge.as_ref(), bridge.as_ref(), &config)?;
    dispatcher.dispatch(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_argument_is_optional() {
        let cli = Cli::try_parse_from(["spoolswitch"]).unwrap();
        assert!(cli.file.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_file_and_config() {
        let cli =
            Cli::try_parse_from(["spoolswitch", "--config", "c.json", "job.txt"]).unwrap();
        assert_eq!(cli.file.as_deref(), Some(Path::new("job.txt")));
        assert_eq!(cli.config.as_deref(), Some(Path::new("c.json")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bad_config_path_fails_before_printing() {
        let dir = tempfile::tempdir().unwrap();
        let job = dir.path().join("job.txt");
        std::fs::write(&job, "Hello").unwrap();

        let err = run(&job, Some(&dir.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, spoolswitch_core::PrintSwitchError::Io(_)));
    }
}
