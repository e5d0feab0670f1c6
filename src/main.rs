//! hostcheck
//!
//! Launches a web server and checks that its health endpoint accepts
//! trusted `Host` headers (200) and rejects everything else (400).
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌────────┐   ┌───────────┐   ┌───────────┐   ┌──────────┐   ┌────────┐
//!   │ config │──▶│ lifecycle │──▶│ lifecycle │──▶│  health  │──▶│ health │
//!   │ + CLI  │   │ launcher  │   │ readiness │   │  runner  │   │ probe  │
//!   └────────┘   └─────┬─────┘   └───────────┘   └────┬─────┘   └────────┘
//!                      │                              │
//!                      ▼                              ▼
//!               server under test ◀──── GET /health ──┘   report → stdout
//! ```
//!
//! By default the exit status is 0 whatever the outcome; `--strict` makes
//! it reflect the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use hostcheck::config::loader::{finalize, load_config, Overrides};
use hostcheck::observability::logging;
use hostcheck::{Harness, HarnessConfig};

#[derive(Parser)]
#[command(name = "hostcheck")]
#[command(about = "Check host header validation on a server's health endpoint", long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Probe an already running server instead of launching one
    #[arg(long)]
    no_launch: bool,

    /// Exit with status 1 unless every case passes
    #[arg(long)]
    strict: bool,

    /// Also write the run summary as JSON
    #[arg(long, value_name = "PATH")]
    report_json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        no_launch: cli.no_launch,
        strict: cli.strict,
    };
    let config = match &cli.config {
        Some(path) => load_config(path, &overrides)?,
        None => finalize(HarnessConfig::default(), &overrides)?,
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        base_url = %config.base_url(),
        launch = config.server.launch,
        cases = config.cases.len(),
        "Configuration loaded"
    );

    let strict = config.strict_exit;
    let harness = Harness::new(config);
    let summary = harness.run(&mut std::io::stdout()).await;

    if let Some(path) = &cli.report_json {
        summary.write_json(path)?;
        tracing::info!(path = %path.display(), "JSON report written");
    }

    if strict && !summary.all_passed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
