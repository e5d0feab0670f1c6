//! Startup wait.
//!
//! The default is a fixed sleep. Polling is opt-in: it connects to the
//! server port until it accepts or the same ceiling expires. Neither mode
//! fails the run; readiness is only a heuristic.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::{self, Instant};

use crate::config::{ReadinessConfig, ReadinessMode};

/// Wait for the server according to `config`.
///
/// Returns `true` if the server was seen accepting connections. Fixed mode
/// never looks and always returns `false`.
pub async fn wait_for_server(config: &ReadinessConfig, addr: &str) -> bool {
    let ceiling = Duration::from_secs(config.startup_delay_secs);

    match config.mode {
        ReadinessMode::Fixed => {
            tracing::info!(delay_secs = config.startup_delay_secs, "Waiting for server to start");
            time::sleep(ceiling).await;
            false
        }
        ReadinessMode::Poll => {
            let interval = Duration::from_millis(config.poll_interval_ms);
            let ready = poll_until_accepting(addr, interval, ceiling).await;
            if ready {
                tracing::info!(addr, "Server accepting connections");
            } else {
                tracing::warn!(
                    addr,
                    ceiling_secs = config.startup_delay_secs,
                    "Server not accepting connections, continuing anyway"
                );
            }
            ready
        }
    }
}

async fn poll_until_accepting(addr: &str, interval: Duration, ceiling: Duration) -> bool {
    let deadline = Instant::now() + ceiling;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if let Ok(Ok(_)) = time::timeout(remaining.max(interval), TcpStream::connect(addr)).await {
            return true;
        }
        if Instant::now() + interval > deadline {
            return false;
        }
        time::sleep(interval).await;
    }
}
