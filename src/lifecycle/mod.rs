//! Lifecycle of the server under test.
//!
//! # Data Flow
//! ```text
//! Launch (launcher.rs):
//!     ServerConfig → spawn child → ServerHandle (owned by the harness)
//!
//! Readiness (readiness.rs):
//!     Fixed delay (default) or poll the port up to the same ceiling
//!
//! End of run:
//!     ServerHandle::finish → detach (default) or kill
//! ```
//!
//! # Design Decisions
//! - Launch failure is logged, not fatal; it surfaces as connection errors
//! - The child is never joined and its exit code is never read

pub mod launcher;
pub mod readiness;

pub use launcher::{launch, ServerHandle};
pub use readiness::wait_for_server;
