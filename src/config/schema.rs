//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the harness.
//! All types derive Serde traits for deserialization from config files, and
//! every default reproduces a plain `hostcheck` run with no config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cases::{default_cases, TestCase};

/// Root configuration for a harness run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Server under test and how to launch it.
    pub server: ServerConfig,

    /// How to wait for the server after launch.
    pub readiness: ReadinessConfig,

    /// Per-request settings.
    pub request: RequestConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Case table, in report order.
    pub cases: Vec<TestCase>,

    /// Exit non-zero when any case does not pass.
    pub strict_exit: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            readiness: ReadinessConfig::default(),
            request: RequestConfig::default(),
            observability: ObservabilityConfig::default(),
            cases: default_cases(),
            strict_exit: false,
        }
    }
}

impl HarnessConfig {
    /// Base URL of the server, e.g. `http://127.0.0.1:5000`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}

/// Server under test.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Name shown in the report banner.
    pub name: String,

    /// Spawn the server. When false, an already running server is probed.
    pub launch: bool,

    /// Executable to run.
    pub program: String,

    /// Arguments placed before `--host`/`--port`.
    pub args: Vec<String>,

    /// Loopback address the server binds to.
    pub host: String,

    /// Port the server binds to.
    pub port: u16,

    /// Extra environment variables for the child process.
    pub env: BTreeMap<String, String>,

    /// Kill the server when the run ends instead of leaving it running.
    pub stop_on_exit: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "MLflow".to_string(),
            launch: true,
            program: "python3".to_string(),
            args: vec!["-m".to_string(), "mlflow.server".to_string()],
            host: "127.0.0.1".to_string(),
            port: 5000,
            env: BTreeMap::new(),
            stop_on_exit: false,
        }
    }
}

/// Startup wait strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessMode {
    /// Sleep for the whole startup delay.
    Fixed,
    /// Poll the server port until it accepts or the delay runs out.
    Poll,
}

/// Readiness configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadinessConfig {
    pub mode: ReadinessMode,

    /// Fixed delay, or polling ceiling, in seconds.
    pub startup_delay_secs: u64,

    /// Interval between polls in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            mode: ReadinessMode::Fixed,
            startup_delay_secs: 3,
            poll_interval_ms: 100,
        }
    }
}

/// Per-request configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Path to probe.
    pub path: String,

    /// Timeout for each case request in seconds.
    pub timeout_secs: u64,

    /// Timeout for the final best-effort probe in seconds.
    pub cleanup_timeout_secs: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            path: "/health".to_string(),
            timeout_secs: 5,
            cleanup_timeout_secs: 1,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
