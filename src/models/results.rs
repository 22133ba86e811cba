//! Per-probe result records
//!
//! Every record carries the same `ok` / `ms` / `error` subset, exposed through
//! [`Outcome`], plus the fields specific to its probe kind. Records are built
//! once by their checker through the `success` / `failure` constructors, which
//! keep `ok == true` paired with `error == None`.

use crate::utils::PingError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

/// Fields shared by every probe result
pub trait Outcome {
    /// Whether the probe succeeded
    fn ok(&self) -> bool;
    /// Wall-clock time spent in the probe, in milliseconds
    fn elapsed_ms(&self) -> f64;
    /// Failure description, if any
    fn error(&self) -> Option<&str>;
}

macro_rules! impl_outcome {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Outcome for $ty {
                fn ok(&self) -> bool {
                    self.ok
                }

                fn elapsed_ms(&self) -> f64 {
                    self.elapsed_ms
                }

                fn error(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )+
    };
}

/// Result of resolving a hostname
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsResult {
    pub ok: bool,
    pub hostname: String,
    /// Resolved addresses, deduplicated and sorted
    pub ips: Vec<String>,
    pub error: Option<String>,
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
}

impl DnsResult {
    /// Create a successful DNS result; duplicate addresses are dropped
    pub fn success(
        hostname: impl Into<String>,
        addresses: impl IntoIterator<Item = IpAddr>,
        elapsed: Duration,
    ) -> Self {
        let mut addresses: Vec<IpAddr> = addresses.into_iter().collect();
        addresses.sort();
        addresses.dedup();

        Self {
            ok: true,
            hostname: hostname.into(),
            ips: addresses.iter().map(|ip| ip.to_string()).collect(),
            error: None,
            elapsed_ms: duration_ms(elapsed),
        }
    }

    /// Create a failed DNS result
    pub fn failure(hostname: impl Into<String>, error: impl ToString, elapsed: Duration) -> Self {
        Self {
            ok: false,
            hostname: hostname.into(),
            ips: vec![],
            error: Some(error.to_string()),
            elapsed_ms: duration_ms(elapsed),
        }
    }
}

/// Result of a TCP connect probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TcpResult {
    pub ok: bool,
    pub host: String,
    pub port: u16,
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    pub error: Option<String>,
}

impl TcpResult {
    pub fn success(host: impl Into<String>, port: u16, elapsed: Duration) -> Self {
        Self {
            ok: true,
            host: host.into(),
            port,
            elapsed_ms: duration_ms(elapsed),
            error: None,
        }
    }

    pub fn failure(
        host: impl Into<String>,
        port: u16,
        error: impl ToString,
        elapsed: Duration,
    ) -> Self {
        Self {
            ok: false,
            host: host.into(),
            port,
            elapsed_ms: duration_ms(elapsed),
            error: Some(error.to_string()),
        }
    }
}

/// Result of an HTTP request probe
///
/// `ok` reflects transport success: any response with a status line counts,
/// including 4xx and 5xx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResult {
    pub ok: bool,
    pub url: String,
    pub status: Option<u16>,
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    pub error: Option<String>,
}

impl HttpResult {
    pub fn success(url: impl Into<String>, status: u16, elapsed: Duration) -> Self {
        Self {
            ok: true,
            url: url.into(),
            status: Some(status),
            elapsed_ms: duration_ms(elapsed),
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl ToString, elapsed: Duration) -> Self {
        Self {
            ok: false,
            url: url.into(),
            status: None,
            elapsed_ms: duration_ms(elapsed),
            error: Some(error.to_string()),
        }
    }
}

/// Result of a TLS certificate expiry probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlsResult {
    pub ok: bool,
    pub host: String,
    pub port: u16,
    /// Leaf certificate expiry (UTC)
    pub not_after: Option<DateTime<Utc>>,
    /// Whole days until expiry, negative once expired
    pub days_left: Option<i64>,
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    pub error: Option<String>,
}

impl TlsResult {
    pub fn success(
        host: impl Into<String>,
        port: u16,
        not_after: DateTime<Utc>,
        now: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        Self {
            ok: true,
            host: host.into(),
            port,
            not_after: Some(not_after),
            days_left: Some(days_remaining(not_after, now)),
            elapsed_ms: duration_ms(elapsed),
            error: None,
        }
    }

    pub fn failure(
        host: impl Into<String>,
        port: u16,
        error: impl ToString,
        elapsed: Duration,
    ) -> Self {
        Self {
            ok: false,
            host: host.into(),
            port,
            not_after: None,
            days_left: None,
            elapsed_ms: duration_ms(elapsed),
            error: Some(error.to_string()),
        }
    }
}

/// Whole days from `now` until `expiry`, rounded toward negative infinity
pub fn days_remaining(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta = expiry - now;
    let days = delta.num_days();
    // num_days truncates toward zero; step down when a partial day remains below it
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}

/// Result of an ICMP ping probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResult {
    pub ok: bool,
    pub host: String,
    pub transmitted: u32,
    pub received: u32,
    pub loss_pct: f64,
    pub avg_ms: Option<f64>,
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    pub error: Option<String>,
}

impl PingResult {
    /// Build a result from a finished ping process
    ///
    /// `ok` requires both a clean exit and at least one reply; `error` is set
    /// to `exit_error` when the probe is not ok.
    pub fn completed(
        host: impl Into<String>,
        transmitted: u32,
        received: u32,
        avg_ms: Option<f64>,
        exit_error: Option<String>,
        elapsed: Duration,
    ) -> Self {
        let host = host.into();
        let ok = exit_error.is_none() && received > 0;
        let error = if ok {
            None
        } else {
            Some(exit_error.unwrap_or_else(|| {
                PingError::NoReplies { host: host.clone() }.to_string()
            }))
        };

        Self {
            ok,
            host,
            transmitted,
            received,
            loss_pct: loss_percentage(transmitted, received),
            avg_ms,
            elapsed_ms: duration_ms(elapsed),
            error,
        }
    }

    /// Create a result for a ping process that could not be run at all
    pub fn failure(
        host: impl Into<String>,
        transmitted: u32,
        error: impl ToString,
        elapsed: Duration,
    ) -> Self {
        Self {
            ok: false,
            host: host.into(),
            transmitted,
            received: 0,
            loss_pct: 100.0,
            avg_ms: None,
            elapsed_ms: duration_ms(elapsed),
            error: Some(error.to_string()),
        }
    }
}

/// Packet loss in percent; zero when nothing was sent
pub fn loss_percentage(transmitted: u32, received: u32) -> f64 {
    if transmitted == 0 {
        return 0.0;
    }
    (1.0 - f64::from(received) / f64::from(transmitted)) * 100.0
}

impl_outcome!(DnsResult, TcpResult, HttpResult, TlsResult, PingResult);
