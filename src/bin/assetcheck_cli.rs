//! AssetCheck CLI - CI gate for the servers catalog
//!
//! Scans `servers/` by default, reports diagnostics on stderr.
//! Returns non-zero if any manifest fails or none are found.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use assetcheck_core::{run, ConsoleReporter, Reporter, DEFAULT_SERVERS_DIR};

#[derive(Parser)]
#[command(name = "assetcheck")]
#[command(about = "Validate server manifest background and icon dimensions")]
#[command(version)]
struct Cli {
    /// Root directory holding one folder per server
    #[arg(default_value = DEFAULT_SERVERS_DIR)]
    root: PathBuf,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut reporter = if cli.no_color {
        ConsoleReporter::new(false)
    } else {
        ConsoleReporter::from_env()
    };

    let summary = match run(&cli.root, &mut reporter) {
        Ok(s) => s,
        Err(e) => {
            reporter.report_error(
                &e.to_string(),
                &["Run from the repository root or pass the servers directory explicitly.".to_string()],
            );
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                reporter.report_error(&format!("Failed to serialize summary: {}", e), &[]);
                return ExitCode::FAILURE;
            }
        }
    }

    if summary.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
