//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!
//! Server child output:
//!     → forwarded as debug events under `hostcheck::server`
//! ```

pub mod logging;
