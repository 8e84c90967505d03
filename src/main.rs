//! precopy - check that two directory trees can be merged safely.
//!
//! Usage:
//!   precopy SRC DEST          Compare every name present in both trees
//!   precopy --format json     Emit the full report as JSON
//!   precopy --help            Show help
//!
//! Exit status is 0 when merging is safe, 3 when some colliding entry
//! differs, and 4 when the check itself could not be completed.

use std::env::var;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, registry};

use precopy_compare::{
    CheckConfig, CheckError, CheckReport, DirectoryPairer, DivergenceKind, Verdict,
};

const EXIT_COPY_UNSAFE: u8 = 3;
const EXIT_OTHER_ERRORS: u8 = 4;

const AFTER_HELP: &str = "\
Exit status is only zero when merging folders is safe, so that you could chain it with rsync, e.g.:
  precopy src_folder dest_folder && rsync -ra --remove-sent-files src_folder/ dest_folder
(Note the trailing slash with the first rsync argument.)

Exit status 3 means some entry exists in both trees and differs; 4 means the check failed.";

#[derive(Parser)]
#[command(
    name = "precopy",
    version,
    about = "Check that a directory can be merged into another without overwriting different data",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Directory that would be copied
    source: Option<PathBuf>,

    /// Directory that would receive the copy
    dest: Option<PathBuf>,

    /// Do not print each divergence as it is found
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = setup(cli.verbose) {
        eprintln!("{err:?}");
        return ExitCode::from(EXIT_OTHER_ERRORS);
    }

    let (Some(source), Some(dest)) = (cli.source.as_deref(), cli.dest.as_deref()) else {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::from(EXIT_OTHER_ERRORS),
        };
    };

    match run_check(source, dest, cli.quiet, cli.format) {
        Ok(Verdict::Safe) => ExitCode::SUCCESS,
        Ok(Verdict::Unsafe) => ExitCode::from(EXIT_COPY_UNSAFE),
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(EXIT_OTHER_ERRORS)
        }
    }
}

fn setup(verbose: u8) -> Result<()> {
    let directives = match var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            format!("precopy={level},precopy_compare={level}")
        }
    };

    registry()
        .with(EnvFilter::builder().parse(directives)?)
        .with(layer().with_writer(std::io::stderr))
        .init();

    color_eyre::install()?;

    Ok(())
}

/// Run the check and print the outcome.
fn run_check(source: &Path, dest: &Path, quiet: bool, format: OutputFormat) -> Result<Verdict> {
    let banner = format!(
        "Checking before copying from '{}' to '{}'",
        source.display(),
        dest.display()
    );
    let stream_notes = !quiet && format == OutputFormat::Text;

    match format {
        OutputFormat::Text => println!("{banner}"),
        OutputFormat::Json => eprintln!("{banner}"),
    }

    let config = CheckConfig::builder()
        .source_root(source)
        .dest_root(dest)
        .build()
        .map_err(CheckError::from)
        .wrap_err("Invalid arguments")?;
    let report = DirectoryPairer::with_config(&config)
        .with_observer(|note| {
            if stream_notes {
                println!("{note}");
            }
        })
        .compare_trees(&config.source_root, &config.dest_root)
        .wrap_err("Check could not be completed")?;

    log_summary(&report);

    let verdict = report.verdict();
    match format {
        OutputFormat::Text => println!("{verdict}"),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "verdict": verdict,
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(verdict)
}

fn log_summary(report: &CheckReport) {
    let stats = &report.stats;
    info!(
        "Compared {} file pairs ({} read) across {} directory pairs in {:.2}s",
        stats.files_compared,
        format_size(stats.bytes_read),
        stats.dirs_paired,
        report.duration.as_secs_f64()
    );
    info!(
        "{} divergence(s): {} type, {} size, {} content; {} source-only entries skipped",
        report.notes.len(),
        report.count_of(DivergenceKind::TypeMismatch),
        report.count_of(DivergenceKind::SizeMismatch),
        report.count_of(DivergenceKind::ContentMismatch),
        stats.source_only
    );
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
