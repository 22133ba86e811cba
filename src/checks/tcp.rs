//! TCP connectivity checker
//!
//! Opens a TCP connection to a host and port, then closes it.

use crate::models::TcpResult;
use crate::utils::TcpError;
use std::io::ErrorKind;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

/// TCP connectivity checker
pub struct TcpChecker {
    timeout: Duration,
}

impl TcpChecker {
    /// Create a new TCP checker with the given timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Check TCP connectivity to `host:port`
    pub async fn check(&self, host: &str, port: u16) -> TcpResult {
        let start = Instant::now();

        match self.connect(host, port).await {
            Ok(()) => TcpResult::success(host, port, start.elapsed()),
            Err(e) => {
                tracing::warn!("{}", e);
                TcpResult::failure(host, port, e, start.elapsed())
            }
        }
    }

    /// Connect and immediately close; the connection time is all that matters
    async fn connect(&self, host: &str, port: u16) -> Result<(), TcpError> {
        match tokio::time::timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(mut stream)) => {
                let _ = stream.shutdown().await;
                Ok(())
            }
            Ok(Err(e)) => Err(classify_connect_error(host, port, &e)),
            Err(_) => Err(TcpError::Timeout {
                host: host.to_string(),
                port,
            }),
        }
    }
}

fn classify_connect_error(host: &str, port: u16, e: &std::io::Error) -> TcpError {
    if e.kind() == ErrorKind::ConnectionRefused {
        return TcpError::ConnectionRefused {
            host: host.to_string(),
            port,
        };
    }

    let error_str = e.to_string().to_lowercase();
    if error_str.contains("unreachable") {
        if error_str.contains("network") {
            TcpError::NetworkUnreachable
        } else {
            TcpError::HostUnreachable {
                host: host.to_string(),
            }
        }
    } else {
        TcpError::ConnectionFailed {
            host: host.to_string(),
            port,
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_connect_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let checker = TcpChecker::new(Duration::from_secs(2));
        let result = checker.check("127.0.0.1", port).await;
        assert!(result.ok);
        assert_eq!(result.port, port);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_tcp_connect_refused() {
        // Bind then drop to find a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let checker = TcpChecker::new(Duration::from_millis(600));
        let result = checker.check("127.0.0.1", port).await;
        assert!(!result.ok);
        assert_eq!(result.host, "127.0.0.1");
        assert!(result.error.is_some());
    }

    #[test]
    fn test_classify_refused() {
        let e = std::io::Error::from(ErrorKind::ConnectionRefused);
        assert!(matches!(
            classify_connect_error("h", 1, &e),
            TcpError::ConnectionRefused { port: 1, .. }
        ));
    }

    #[test]
    fn test_classify_other() {
        let e = std::io::Error::new(ErrorKind::Other, "boom");
        let err = classify_connect_error("h", 2, &e);
        assert_eq!(err.to_string(), "TCP connection failed to h:2: boom");
    }
}
