//! Check orchestration engine
//!
//! Fans every requested probe out concurrently and joins them all. Probes of
//! one kind form a homogeneous group (`join_all`); the five groups are joined
//! with `tokio::join!`. Nothing is cancelled early and nothing is retried: a
//! failing probe just yields a failed result record.

use crate::checks::{DnsChecker, HttpChecker, PingChecker, TcpChecker, TlsChecker};
use crate::config::Settings;
use crate::models::{DnsResult, HttpResult, PingResult, ResultsMap, TcpResult, TlsResult};
use futures::future::join_all;
use std::fmt;
use std::time::{Duration, Instant};

/// A `host:port` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: u16,
}

impl HostPort {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for HostPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Ping request: target host and number of echo requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingTarget {
    pub host: String,
    pub count: u32,
}

/// The set of probes requested for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckPlan {
    pub dns: Option<String>,
    pub ping: Option<PingTarget>,
    pub tcp: Vec<HostPort>,
    pub http: Vec<String>,
    pub tls: Option<HostPort>,
}

impl CheckPlan {
    /// Number of individual probes this plan dispatches
    pub fn len(&self) -> usize {
        usize::from(self.dns.is_some())
            + usize::from(self.ping.is_some())
            + self.tcp.len()
            + self.http.len()
            + usize::from(self.tls.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run every probe in `plan` concurrently and collect the results
pub async fn run_checks(plan: &CheckPlan, settings: &Settings) -> ResultsMap {
    let start = Instant::now();
    tracing::debug!("Dispatching {} probe(s)", plan.len());

    let (dns, ping, tcp, http, tls) = tokio::join!(
        run_dns(plan.dns.as_deref(), settings),
        run_ping(plan.ping.as_ref(), settings),
        run_tcp(&plan.tcp, settings),
        run_http(&plan.http, settings),
        run_tls(plan.tls.as_ref(), settings),
    );

    tracing::debug!("All probes finished in {:?}", start.elapsed());

    ResultsMap {
        dns,
        ping,
        tcp,
        http,
        tls,
    }
}

async fn run_dns(hostname: Option<&str>, settings: &Settings) -> Option<DnsResult> {
    let hostname = hostname?;
    Some(DnsChecker::new(settings.dns.timeout()).check(hostname).await)
}

async fn run_ping(target: Option<&PingTarget>, settings: &Settings) -> Option<PingResult> {
    let target = target?;
    let checker = PingChecker::new(target.count, &settings.ping);
    Some(checker.check(&target.host).await)
}

async fn run_tcp(targets: &[HostPort], settings: &Settings) -> Option<Vec<TcpResult>> {
    if targets.is_empty() {
        return None;
    }
    let checker = TcpChecker::new(settings.tcp.timeout());
    Some(join_all(targets.iter().map(|t| checker.check(&t.host, t.port))).await)
}

async fn run_http(urls: &[String], settings: &Settings) -> Option<Vec<HttpResult>> {
    if urls.is_empty() {
        return None;
    }
    match HttpChecker::new(&settings.http) {
        Ok(checker) => Some(join_all(urls.iter().map(|url| checker.check(url))).await),
        Err(e) => {
            tracing::warn!("{}", e);
            Some(
                urls.iter()
                    .map(|url| HttpResult::failure(url.as_str(), &e, Duration::ZERO))
                    .collect(),
            )
        }
    }
}

async fn run_tls(target: Option<&HostPort>, settings: &Settings) -> Option<TlsResult> {
    let target = target?;
    let checker = TlsChecker::new(settings.tls.clone());
    Some(checker.check(&target.host, target.port).await)
}
