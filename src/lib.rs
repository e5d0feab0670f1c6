//! Host header validation harness.

pub mod cases;
pub mod config;
pub mod error;
pub mod harness;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod report;

pub use cases::{default_cases, TestCase};
pub use config::schema::HarnessConfig;
pub use harness::Harness;
pub use report::{CaseReport, Outcome, RunSummary};
