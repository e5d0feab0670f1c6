//! Health endpoint checks.
//!
//! # Data Flow
//! ```text
//! Case table
//!     → runner.rs (GET /health per case, classify, print line)
//!     → RunSummary
//!
//! After the loop:
//!     → probe.rs (one unchecked GET, errors discarded)
//! ```
//!
//! # Design Decisions
//! - Every request has a deadline
//! - No retries; each case is attempted exactly once
//! - Only the status code is consumed, the body is ignored

pub mod probe;
pub mod runner;

pub use probe::best_effort_probe;
pub use runner::ValidationRunner;
