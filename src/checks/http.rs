//! HTTP(S) request checker
//!
//! Issues one request per URL. Any response carrying a status line counts as
//! success; only transport failures (connect, TLS, timeout, protocol) fail.

use crate::config::HttpSettings;
use crate::models::HttpResult;
use crate::utils::HttpError;
use reqwest::{Client, Method};
use std::fmt::Write;
use std::time::{Duration, Instant};

/// HTTP checker sharing one client across all URLs of a run
pub struct HttpChecker {
    client: Client,
    method: Method,
    deadline: Duration,
}

impl HttpChecker {
    /// Build a checker from HTTP settings
    pub fn new(settings: &HttpSettings) -> Result<Self, HttpError> {
        let method = Method::from_bytes(settings.method.trim().to_uppercase().as_bytes())
            .map_err(|_| HttpError::InvalidMethod {
                method: settings.method.clone(),
            })?;

        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| HttpError::ClientBuild {
                message: error_chain(&e),
            })?;

        Ok(Self {
            client,
            method,
            deadline: settings.deadline(),
        })
    }

    /// Request `url` and report the status code received
    pub async fn check(&self, url: &str) -> HttpResult {
        let start = Instant::now();

        match self.request(url).await {
            Ok(status) => {
                tracing::debug!("{} {} -> {}", self.method, url, status);
                HttpResult::success(url, status, start.elapsed())
            }
            Err(e) => {
                tracing::warn!("{}", e);
                HttpResult::failure(url, e, start.elapsed())
            }
        }
    }

    async fn request(&self, url: &str) -> Result<u16, HttpError> {
        let send = self.client.request(self.method.clone(), url).send();

        match tokio::time::timeout(self.deadline, send).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(e)) if e.is_timeout() => Err(HttpError::Timeout {
                url: url.to_string(),
            }),
            Ok(Err(e)) => Err(HttpError::RequestFailed {
                url: url.to_string(),
                message: error_chain(&e),
            }),
            Err(_) => Err(HttpError::Timeout {
                url: url.to_string(),
            }),
        }
    }
}

/// Flatten an error and its sources into one line
fn error_chain(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = err.to_string();
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
