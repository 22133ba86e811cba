//! TLS certificate expiry checker
//!
//! Performs a verified TLS handshake against the Mozilla root set and reads
//! the leaf certificate's `notAfter`.

use crate::config::TlsSettings;
use crate::models::TlsResult;
use crate::utils::TlsError;
use chrono::{DateTime, TimeZone, Utc};
use rustls::pki_types::ServerName;
use rustls::ClientConfig;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use x509_parser::parse_x509_certificate;

/// TLS expiry checker
pub struct TlsChecker {
    settings: TlsSettings,
    connector: TlsConnector,
}

impl TlsChecker {
    /// Create a new TLS checker with the given settings
    pub fn new(settings: TlsSettings) -> Self {
        // reqwest may pull in a second provider; make ring the process default
        let _ = rustls::crypto::ring::default_provider().install_default();

        let root_store =
            rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self {
            settings,
            connector: TlsConnector::from(Arc::new(config)),
        }
    }

    /// Handshake with `host:port` and report days until the certificate expires
    pub async fn check(&self, host: &str, port: u16) -> TlsResult {
        let start = Instant::now();

        let outcome = match tokio::time::timeout(
            self.settings.deadline(),
            self.fetch_expiry(host, port),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(TlsError::Timeout),
        };

        match outcome {
            Ok(not_after) => {
                let result = TlsResult::success(host, port, not_after, Utc::now(), start.elapsed());
                tracing::debug!(
                    "{}:{} certificate expires {} ({:?} days)",
                    host,
                    port,
                    not_after,
                    result.days_left
                );
                result
            }
            Err(e) => {
                tracing::warn!("{}:{} {}", host, port, e);
                TlsResult::failure(host, port, e, start.elapsed())
            }
        }
    }

    async fn fetch_expiry(&self, host: &str, port: u16) -> Result<DateTime<Utc>, TlsError> {
        let stream = tokio::time::timeout(
            self.settings.connect_timeout(),
            TcpStream::connect((host, port)),
        )
        .await
        .map_err(|_| TlsError::ConnectionError {
            host: host.to_string(),
            port,
            message: "TCP connection timed out".to_string(),
        })?
        .map_err(|e| TlsError::ConnectionError {
            host: host.to_string(),
            port,
            message: e.to_string(),
        })?;

        let server_name =
            ServerName::try_from(host.to_string()).map_err(|_| TlsError::InvalidServerName {
                host: host.to_string(),
            })?;

        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|e| TlsError::HandshakeFailed {
                message: e.to_string(),
            })?;

        let (_, client_connection) = tls_stream.get_ref();
        let leaf = client_connection
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or(TlsError::NoCertificate)?;

        expiry_from_der(leaf.as_ref())
    }
}

/// Read `notAfter` from a DER-encoded certificate
pub fn expiry_from_der(der: &[u8]) -> Result<DateTime<Utc>, TlsError> {
    let (_, cert) = parse_x509_certificate(der).map_err(|e| TlsError::ParseError {
        message: e.to_string(),
    })?;

    let timestamp = cert.validity().not_after.timestamp();
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or(TlsError::MissingExpiry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_der_is_parse_error() {
        let err = expiry_from_der(&[0x30, 0x82, 0x01, 0x00]).unwrap_err();
        assert!(matches!(err, TlsError::ParseError { .. }));
    }

    #[tokio::test]
    async fn test_plain_tcp_server_fails_handshake() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                use tokio::io::AsyncWriteExt;
                let _ = socket.write_all(b"HTTP/1.1 400 Bad Request\r\n\r\n").await;
                let _ = socket.shutdown().await;
            }
        });

        let checker = TlsChecker::new(TlsSettings::default());
        let result = checker.check("127.0.0.1", port).await;
        assert!(!result.ok);
        assert!(result.not_after.is_none());
        assert!(result.days_left.is_none());
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_closed_port_fails() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let checker = TlsChecker::new(TlsSettings::default());
        let result = checker.check("127.0.0.1", port).await;
        assert!(!result.ok);
        assert_eq!(result.port, port);
        assert!(result.error.unwrap().contains("TCP connection"));
    }
}
