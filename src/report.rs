//! Console report.
//!
//! stdout carries the human-readable contract: a banner, one line per case,
//! and a footer. Diagnostics go through `tracing` to stderr instead.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::cases::TestCase;

const RULE_WIDTH: usize = 60;

/// Classification of a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Outcome {
    /// Observed status matched.
    Pass { status: u16 },
    /// Observed status differed.
    Fail { expected: u16, actual: u16 },
    /// The request did not complete.
    Error { message: String },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass { .. } => "pass",
            Outcome::Fail { .. } => "fail",
            Outcome::Error { .. } => "error",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }
}

/// A case together with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    #[serde(flatten)]
    pub case: TestCase,
    pub outcome: Outcome,
}

impl CaseReport {
    pub fn new(case: TestCase, outcome: Outcome) -> Self {
        Self { case, outcome }
    }
}

/// Aggregate of a run, in case order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    /// Set when setup failed before the case loop could run.
    pub setup_error: Option<String>,
    pub cases: Vec<CaseReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: CaseReport) {
        match report.outcome {
            Outcome::Pass { .. } => self.passed += 1,
            Outcome::Fail { .. } => self.failed += 1,
            Outcome::Error { .. } => self.errors += 1,
        }
        self.cases.push(report);
    }

    /// True when setup succeeded and every case passed.
    pub fn all_passed(&self) -> bool {
        self.setup_error.is_none() && self.failed == 0 && self.errors == 0
    }

    /// Write the summary as pretty JSON.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Format the report line for one case.
pub fn format_line(report: &CaseReport) -> String {
    let case = &report.case;
    match &report.outcome {
        Outcome::Pass { .. } => {
            format!("✓ PASS: {} - Host: '{}'", case.description, case.host_header)
        }
        Outcome::Fail { expected, actual } => format!(
            "✗ FAIL (expected {}, got {}): {} - Host: '{}'",
            expected, actual, case.description, case.host_header
        ),
        Outcome::Error { message } => format!("✗ ERROR: {} - {}", case.description, message),
    }
}

/// Write one case line and flush so it shows up immediately.
pub fn write_line<W: Write>(out: &mut W, report: &CaseReport) -> io::Result<()> {
    writeln!(out, "{}", format_line(report))?;
    out.flush()
}

pub fn write_banner<W: Write>(out: &mut W, server_name: &str, path: &str) -> io::Result<()> {
    writeln!(
        out,
        "Testing host header validation for {} {} endpoint...",
        server_name, path
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    out.flush()
}

pub fn write_footer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Host header validation test completed!")?;
    out.flush()
}

pub fn write_setup_error<W: Write>(out: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "Test setup error: {}", err)?;
    out.flush()
}
