//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HarnessConfig (validated, immutable)
//!     → CLI flags applied on top in main.rs
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; no file means the built-in run
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::HarnessConfig;
pub use schema::ReadinessConfig;
pub use schema::ReadinessMode;
pub use schema::RequestConfig;
pub use schema::ServerConfig;
