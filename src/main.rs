//! beacon-assembly: builds the 3D mock-up of the WSPR beacon board
//!
//! Lays out the board, builds it into an in-memory CAD document and writes the
//! document as JSON or as an OpenSCAD script.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use beacon_assembly::config::{self, Config};
use beacon_assembly::document::{build_beacon, Workspace};
use beacon_assembly::error::Error;
use beacon_assembly::export::{self, ExportFormat};

/// Builds the 3D mock-up of the WSPR beacon board.
///
/// Runs with the built-in beacon dimensions unless a configuration file
/// overrides them.
#[derive(Parser, Debug)]
#[command(name = "beacon-assembly")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Output file (overrides the configured path; stdout if neither is set)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: json or scad (overrides the configured format)
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the assembly and writes the export.
fn run(cfg: &Config, output: Option<PathBuf>, format: Option<ExportFormat>) -> Result<(), Error> {
    let board = cfg.board.spec();
    let mut workspace = Workspace::new(cfg.document.name_policy);
    let report = build_beacon(&mut workspace, &cfg.document.name, &board)?;

    info!(
        document = %report.document,
        lookup = ?report.lookup,
        objects = report.objects.len(),
        "Assembly built"
    );

    let Some(doc) = workspace.get(&report.document) else {
        return Ok(());
    };

    let format = format.unwrap_or(cfg.export.format);
    match output.or_else(|| cfg.export.path.clone()) {
        Some(path) => export::export(doc, format, &path)?,
        None => {
            let rendered = export::render(doc, format)?;
            std::io::stdout()
                .lock()
                .write_all(rendered.as_bytes())
                .map_err(Error::Output)?;
        }
    }

    Ok(())
}

/// Entry point for beacon-assembly.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nConfig read from: {}", default_path.display());
                    eprintln!("See config/example-config.json for the format");
                }
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting beacon-assembly"
    );

    match run(&cfg, args.output, args.format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Build failed");
            ExitCode::FAILURE
        }
    }
}
