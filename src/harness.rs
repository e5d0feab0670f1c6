//! Harness orchestration.
//!
//! A single linear pass:
//!
//! ```text
//! LAUNCH → WAIT → (REQUEST → CLASSIFY → REPORT) per case → PROBE → DONE
//! ```
//!
//! Nothing here aborts the run early. Launch failures become connection
//! errors on the cases, setup failures are printed and the probe and footer
//! still run.

use std::io::Write;
use std::time::Duration;

use crate::config::HarnessConfig;
use crate::health::{best_effort_probe, ValidationRunner};
use crate::lifecycle::{self, ServerHandle};
use crate::report::{self, RunSummary};

/// One harness run over a validated config.
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Execute the run, writing the report to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> RunSummary {
        let config = &self.config;

        if let Err(e) = report::write_banner(out, &config.server.name, &config.request.path) {
            tracing::warn!(error = %e, "Failed to write banner");
        }

        let server = self.start_server().await;

        // The probe goes to the same endpoint the cases used.
        let (summary, probe_url) = match ValidationRunner::from_config(config) {
            Ok(runner) => {
                tracing::info!(url = %runner.url(), cases = config.cases.len(), "Running cases");
                let summary = runner.run_all(&config.cases, out).await;
                (summary, runner.url().to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "Test setup failed");
                if let Err(write_err) = report::write_setup_error(out, &e) {
                    tracing::warn!(error = %write_err, "Failed to write setup error");
                }
                let summary = RunSummary {
                    setup_error: Some(e.to_string()),
                    ..RunSummary::default()
                };
                (summary, format!("{}{}", config.base_url(), config.request.path))
            }
        };

        best_effort_probe(
            &probe_url,
            Duration::from_secs(config.request.cleanup_timeout_secs),
        )
        .await;

        if let Err(e) = report::write_footer(out) {
            tracing::warn!(error = %e, "Failed to write footer");
        }

        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            errors = summary.errors,
            "Run complete"
        );

        if let Some(handle) = server {
            handle.finish().await;
        }

        summary
    }

    /// Launch the server if configured to, then wait for it.
    ///
    /// The wait is skipped when nothing was launched.
    async fn start_server(&self) -> Option<ServerHandle> {
        let config = &self.config;
        if !config.server.launch {
            tracing::info!(base_url = %config.base_url(), "Launch disabled, using running server");
            return None;
        }

        let handle = match lifecycle::launch(&config.server) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Server launch failed");
                None
            }
        };

        let addr = format!("{}:{}", config.server.host, config.server.port);
        lifecycle::wait_for_server(&config.readiness, &addr).await;

        handle
    }
}
