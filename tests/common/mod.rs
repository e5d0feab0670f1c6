//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hostcheck::HarnessConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Hosts the mock server trusts, as the real server's allow-list would.
pub const TRUSTED_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "localhost:5000", "127.0.0.1:5000"];

/// A running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Requests received so far.
    #[allow(dead_code)]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Harness config pointed at this backend with launching disabled.
    #[allow(dead_code)]
    pub fn harness_config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.server.launch = false;
        config.server.host = self.addr.ip().to_string();
        config.server.port = self.addr.port();
        config
    }
}

/// Start a backend that answers 200 for trusted `Host` values and 400 otherwise.
pub async fn start_host_validating_backend() -> MockBackend {
    start_programmable_backend(|host| match host {
        Some(h) if TRUSTED_HOSTS.contains(&h) => 200,
        _ => 400,
    })
    .await
}

/// Start a backend whose status is computed from the request's `Host` header.
pub async fn start_programmable_backend<F>(f: F) -> MockBackend
where
    F: Fn(Option<&str>) -> u16 + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let f = Arc::new(f);

    let counter = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();
                        let mut lines = BufReader::new(read_half).lines();

                        let mut host = None;
                        while let Ok(Some(line)) = lines.next_line().await {
                            if line.is_empty() {
                                break;
                            }
                            if let Some((name, value)) = line.split_once(':') {
                                if name.eq_ignore_ascii_case("host") {
                                    host = Some(value.trim().to_string());
                                }
                            }
                        }
                        counter.fetch_add(1, Ordering::SeqCst);

                        // 0 means hang up without answering.
                        let status = f(host.as_deref());
                        if status == 0 {
                            return;
                        }
                        let reason = match status {
                            200 => "OK",
                            400 => "Bad Request",
                            404 => "Not Found",
                            500 => "Internal Server Error",
                            _ => "Unknown",
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status, reason
                        );
                        let _ = write_half.write_all(response.as_bytes()).await;
                        let _ = write_half.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, hits }
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
