//! Server launcher.
//!
//! Spawns the server under test as a child process bound to a fixed
//! loopback address. The main flow never waits on the child; its exit code
//! is never checked.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};

use crate::config::ServerConfig;
use crate::error::LaunchError;

/// Longest chunk of server output logged as one line.
const MAX_LINE_BYTES: usize = 8 * 1024;

/// Owned handle to a launched server.
#[derive(Debug)]
pub struct ServerHandle {
    child: Child,
    stop_on_exit: bool,
}

impl ServerHandle {
    /// OS process id, if the child is still running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Release the server at the end of a run.
    ///
    /// Unless `stop_on_exit` is set the child is left running and `None` is
    /// returned. Otherwise the child is killed and reaped, and its exit
    /// status returned.
    pub async fn finish(mut self) -> Option<ExitStatus> {
        if let Ok(Some(status)) = self.child.try_wait() {
            tracing::warn!(%status, "Server exited during the run");
            return Some(status);
        }

        let pid = self.id();
        if !self.stop_on_exit {
            tracing::debug!(?pid, "Leaving server running");
            return None;
        }

        if let Err(e) = self.child.start_kill() {
            tracing::warn!(?pid, error = %e, "Failed to stop server");
            return None;
        }
        match self.child.wait().await {
            Ok(status) => {
                tracing::info!(?pid, %status, "Server stopped");
                Some(status)
            }
            Err(e) => {
                tracing::warn!(?pid, error = %e, "Failed to reap server");
                None
            }
        }
    }
}

/// Full argument list: configured args, then `--host <host> --port <port>`.
pub fn server_args(config: &ServerConfig) -> Vec<String> {
    let mut args = config.args.clone();
    args.extend([
        "--host".to_string(),
        config.host.clone(),
        "--port".to_string(),
        config.port.to_string(),
    ]);
    args
}

/// Spawn the server without blocking.
///
/// stdout and stderr are forwarded line by line to the log at debug level
/// and otherwise discarded.
pub fn launch(config: &ServerConfig) -> Result<ServerHandle, LaunchError> {
    let args = server_args(config);

    let mut child = Command::new(&config.program)
        .args(&args)
        .envs(&config.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: config.program.clone(),
            source,
        })?;

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(drain_output(stdout, "stdout"));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(drain_output(stderr, "stderr"));
    }

    tracing::info!(
        program = %config.program,
        args = ?args,
        pid = ?child.id(),
        "Server launched"
    );

    Ok(ServerHandle {
        child,
        stop_on_exit: config.stop_on_exit,
    })
}

/// Read the stream until EOF, logging it in lines of at most
/// `MAX_LINE_BYTES`. Bytes that are not UTF-8 are logged lossily.
///
/// Returns the number of lines logged.
async fn drain_output<R>(reader: R, stream: &'static str) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        let chunk = match reader.fill_buf().await {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!(stream, error = %e, "Server output closed");
                break;
            }
        };
        if chunk.is_empty() {
            break;
        }

        let (used, complete) = match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (chunk.len(), false),
        };
        line.extend_from_slice(&chunk[..used]);
        reader.consume(used);

        if complete || line.len() >= MAX_LINE_BYTES {
            log_line(&line, stream);
            line.clear();
            count += 1;
        }
    }

    if !line.is_empty() {
        log_line(&line, stream);
        count += 1;
    }
    count
}

fn log_line(line: &[u8], stream: &'static str) {
    let text = String::from_utf8_lossy(line);
    tracing::debug!(target: "hostcheck::server", stream, "{}", text.trim_end_matches(['\r', '\n']));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_line() {
        let args = server_args(&ServerConfig::default());
        assert_eq!(
            args,
            vec!["-m", "mlflow.server", "--host", "127.0.0.1", "--port", "5000"]
        );
    }

    #[tokio::test]
    async fn test_missing_program() {
        let config = ServerConfig {
            program: "hostcheck-no-such-program".into(),
            ..ServerConfig::default()
        };
        let err = launch(&config).unwrap_err();
        assert!(err.to_string().contains("hostcheck-no-such-program"));
    }

    #[tokio::test]
    async fn test_drain_keeps_going_past_invalid_utf8() {
        let input: &[u8] = b"starting\n\xff\xfe\nstill here\nno newline";
        assert_eq!(drain_output(input, "stdout").await, 4);
    }

    #[tokio::test]
    async fn test_drain_splits_unterminated_output() {
        let input = vec![b'a'; MAX_LINE_BYTES * 3];
        let lines = drain_output(&input[..], "stdout").await;
        assert!(lines >= 3, "got {} lines", lines);
    }

    #[cfg(unix)]
    fn process_alive(pid: u32) -> bool {
        std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("kill -0 {}", pid))
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_server_survives_binary_output() {
        let marker = std::env::temp_dir().join(format!("hostcheck-marker-{}", std::process::id()));
        let _ = std::fs::remove_file(&marker);

        let script = format!(
            "printf '\\377\\n'; sleep 1; head -c 200000 /dev/zero | tr '\\0' a; echo; touch {}; sleep 5",
            marker.display()
        );
        let config = ServerConfig {
            program: "sh".into(),
            args: vec!["-c".into(), script],
            stop_on_exit: true,
            ..ServerConfig::default()
        };
        let handle = launch(&config).unwrap();
        let pid = handle.id().unwrap();

        let mut seen = false;
        for _ in 0..50 {
            if marker.exists() {
                seen = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        assert!(seen, "server stopped before finishing its output");
        assert!(process_alive(pid));

        handle.finish().await;
        let _ = std::fs::remove_file(&marker);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stop_on_exit_kills_child() {
        let config = ServerConfig {
            program: "sh".into(),
            args: vec!["-c".into(), "sleep 30".into()],
            stop_on_exit: true,
            ..ServerConfig::default()
        };
        let handle = launch(&config).unwrap();
        let pid = handle.id().unwrap();
        assert!(process_alive(pid));

        let status = handle.finish().await.expect("child should be reaped");
        assert!(!status.success());
        assert!(!process_alive(pid));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_detached_child_keeps_running() {
        let config = ServerConfig {
            program: "sh".into(),
            args: vec!["-c".into(), "sleep 30".into()],
            ..ServerConfig::default()
        };
        let handle = launch(&config).unwrap();
        let pid = handle.id().unwrap();

        assert!(handle.finish().await.is_none());
        assert!(process_alive(pid));

        let _ = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("kill {}", pid))
            .status();
    }
}
