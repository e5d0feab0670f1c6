//! Test case table.
//!
//! A case pairs a `Host` header value with the status the server is expected
//! to answer with. The table is built once and read-only for the whole run.

use serde::{Deserialize, Serialize};

/// One host header probe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestCase {
    /// Value sent as the `Host` header. Empty means no override is sent.
    #[serde(default)]
    pub host_header: String,

    /// Status code the server should return.
    pub expected_status: u16,

    /// Label used in the report.
    pub description: String,
}

impl TestCase {
    pub fn new(host_header: &str, expected_status: u16, description: &str) -> Self {
        Self {
            host_header: host_header.to_string(),
            expected_status,
            description: description.to_string(),
        }
    }

    /// The header value to send, or `None` when the client default applies.
    pub fn host_override(&self) -> Option<&str> {
        if self.host_header.is_empty() {
            None
        } else {
            Some(&self.host_header)
        }
    }
}

/// Built-in table: loopback names are trusted, everything else is rejected.
pub fn default_cases() -> Vec<TestCase> {
    vec![
        // Valid cases
        TestCase::new("localhost", 200, "Valid localhost"),
        TestCase::new("127.0.0.1", 200, "Valid IP address"),
        TestCase::new("localhost:5000", 200, "Valid localhost with port"),
        TestCase::new("127.0.0.1:5000", 200, "Valid IP with port"),
        // Invalid cases
        TestCase::new("evil.com", 400, "Invalid external domain"),
        TestCase::new("attacker.com:80", 400, "Invalid external domain with port"),
        TestCase::new("", 400, "Empty host header"),
        TestCase::new("malicious-site.net", 400, "Malicious domain"),
    ]
}
