//! Validation runner.
//!
//! # Responsibilities
//! - Send one GET per case, with the case's `Host` override if any
//! - Classify the result against the expected status
//! - Report each case as soon as it completes, in table order

use std::io::Write;
use std::time::Duration;

use reqwest::header::HOST;
use reqwest::Client;
use url::Url;

use crate::cases::TestCase;
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::report::{self, CaseReport, Outcome, RunSummary};

/// Runs the case table against one health endpoint.
#[derive(Debug, Clone)]
pub struct ValidationRunner {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl ValidationRunner {
    /// Build a runner for `<base_url><path>`.
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self, HarnessError> {
        let url = Url::parse(base_url)?.join(path)?;
        Ok(Self {
            client: build_client()?,
            url,
            timeout,
        })
    }

    pub fn from_config(config: &HarnessConfig) -> Result<Self, HarnessError> {
        Self::new(
            &config.base_url(),
            &config.request.path,
            Duration::from_secs(config.request.timeout_secs),
        )
    }

    /// Endpoint every case is sent to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send the request for one case and classify the response.
    pub async fn run_case(&self, case: &TestCase) -> Outcome {
        let mut request = self.client.get(self.url.clone()).timeout(self.timeout);
        if let Some(host) = case.host_override() {
            request = request.header(HOST, host);
        }

        match request.send().await {
            Ok(response) => {
                let actual = response.status().as_u16();
                if actual == case.expected_status {
                    Outcome::Pass { status: actual }
                } else {
                    Outcome::Fail {
                        expected: case.expected_status,
                        actual,
                    }
                }
            }
            Err(e) => Outcome::Error {
                message: error_chain(&e),
            },
        }
    }

    /// Run every case in order, writing one line per case to `out`.
    ///
    /// A transport error on one case never stops the others.
    pub async fn run_all<W: Write>(&self, cases: &[TestCase], out: &mut W) -> RunSummary {
        let mut summary = RunSummary::default();

        for case in cases {
            let outcome = self.run_case(case).await;
            tracing::debug!(
                description = %case.description,
                host = %case.host_header,
                outcome = outcome.label(),
                "Case finished"
            );

            let report = CaseReport::new(case.clone(), outcome);
            if let Err(e) = report::write_line(out, &report) {
                tracing::warn!(error = %e, "Failed to write report line");
            }
            summary.push(report);
        }

        summary
    }
}

/// Client that ignores proxy settings and keeps no idle connections, so
/// each case starts on a fresh connection.
fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
}

/// reqwest's top-level message omits the cause (refused, timed out, ...).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
