//! zone-audit
//!
//! Checks a zoned network security model against the multi-level security
//! rules and prints every violation found.
//!
//! ## Input
//!
//! - `canonical` (default): the JSON model produced by the diagram converter
//! - `alloy-xml`: an Alloy analyzer instance export from older deployments
//!
//! ## Exit status
//!
//! - 0: report printed
//! - 1: input could not be read or parsed
//! - 2: `--fail-on-violations` was given and the model has violations

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use detection_engine::DetectionEngine;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod error;
mod input;
mod render;

use input::InputFormat;
use render::OutputFormat;

/// Command-line arguments for zone-audit
#[derive(Parser, Debug)]
#[command(name = "zone-audit")]
#[command(about = "Check a zoned network model against multi-level security rules")]
struct Args {
    /// Model file to check, or "-" to read stdin
    input: PathBuf,

    /// Format of the input document
    #[arg(long, value_enum, default_value = "canonical", env = "ZONE_AUDIT_INPUT_FORMAT")]
    input_format: InputFormat,

    /// Report format written to stdout
    #[arg(short, long, value_enum, default_value = "json", env = "ZONE_AUDIT_OUTPUT")]
    output: OutputFormat,

    /// Exit with status 2 when any violation is found
    #[arg(long)]
    fail_on_violations: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = input::read_source(&args.input)?;
    let model = input::parse_model(&source, args.input_format)
        .with_context(|| format!("failed to load model from {}", args.input.display()))?;
    info!(
        "Loaded model: {} zones, {} data assets, {} systems, {} connections",
        model.locations.len(),
        model.data.len(),
        model.systems.len(),
        model.connections.len()
    );

    let report = DetectionEngine::new().evaluate(&model);
    info!(
        "Found {} violation(s), security score {}",
        report.total_count,
        report.security_score()
    );

    let rendered = render::render(&report, args.output).context("failed to render report")?;
    println!("{}", rendered);

    if args.fail_on_violations && !report.is_clean() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
