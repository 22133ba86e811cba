//! Results map and aggregate report

use super::results::{DnsResult, HttpResult, Outcome, PingResult, TcpResult, TlsResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of diagnostic check, in report block order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckKind {
    Dns,
    Ping,
    Tcp,
    Http,
    Tls,
}

impl CheckKind {
    /// All kinds in the order the report renders them
    pub const ALL: [CheckKind; 5] = [
        CheckKind::Dns,
        CheckKind::Ping,
        CheckKind::Tcp,
        CheckKind::Http,
        CheckKind::Tls,
    ];

    /// Key used in the JSON results object
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Dns => "dns",
            CheckKind::Ping => "ping",
            CheckKind::Tcp => "tcp",
            CheckKind::Http => "http",
            CheckKind::Tls => "tls",
        }
    }

    /// Block title in the console report
    pub fn title(&self) -> &'static str {
        match self {
            CheckKind::Dns => "DNS",
            CheckKind::Ping => "PING",
            CheckKind::Tcp => "TCP",
            CheckKind::Http => "HTTP",
            CheckKind::Tls => "TLS",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Results keyed by check kind
///
/// A `None` entry means the check was not requested. TCP and HTTP hold one
/// result per target, in target order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping: Option<PingResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<Vec<TcpResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<Vec<HttpResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsResult>,
}

impl ResultsMap {
    /// Whether the given kind was requested
    pub fn contains(&self, kind: CheckKind) -> bool {
        match kind {
            CheckKind::Dns => self.dns.is_some(),
            CheckKind::Ping => self.ping.is_some(),
            CheckKind::Tcp => self.tcp.is_some(),
            CheckKind::Http => self.http.is_some(),
            CheckKind::Tls => self.tls.is_some(),
        }
    }

    /// Requested kinds in block order
    pub fn kinds(&self) -> Vec<CheckKind> {
        CheckKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }

    /// Every individual result, list entries flattened, in block order
    pub fn outcomes(&self) -> Vec<(CheckKind, &dyn Outcome)> {
        let mut out: Vec<(CheckKind, &dyn Outcome)> = Vec::new();
        if let Some(r) = &self.dns {
            out.push((CheckKind::Dns, r as &dyn Outcome));
        }
        if let Some(r) = &self.ping {
            out.push((CheckKind::Ping, r as &dyn Outcome));
        }
        for r in self.tcp.iter().flatten() {
            out.push((CheckKind::Tcp, r as &dyn Outcome));
        }
        for r in self.http.iter().flatten() {
            out.push((CheckKind::Http, r as &dyn Outcome));
        }
        if let Some(r) = &self.tls {
            out.push((CheckKind::Tls, r as &dyn Outcome));
        }
        out
    }

    /// Conjunction of every result's `ok`; vacuously true when empty
    pub fn all_ok(&self) -> bool {
        self.outcomes().iter().all(|(_, outcome)| outcome.ok())
    }
}

/// Aggregate output of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    ok: bool,
    generated_at: DateTime<Utc>,
    results: ResultsMap,
}

impl Report {
    /// Build a report stamped with the current time
    pub fn build(results: ResultsMap) -> Self {
        Self::build_at(results, Utc::now())
    }

    /// Build a report with an explicit generation timestamp
    pub fn build_at(results: ResultsMap, generated_at: DateTime<Utc>) -> Self {
        Self {
            ok: results.all_ok(),
            generated_at,
            results,
        }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn results(&self) -> &ResultsMap {
        &self.results
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        if self.ok {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tcp(ok: bool) -> TcpResult {
        if ok {
            TcpResult::success("127.0.0.1", 80, Duration::from_millis(1))
        } else {
            TcpResult::failure("127.0.0.1", 9, "refused", Duration::from_millis(1))
        }
    }

    #[test]
    fn test_empty_report_is_ok() {
        let report = Report::build(ResultsMap::default());
        assert!(report.ok());
        assert_eq!(report.exit_code(), 0);
        assert!(report.results().is_empty());
    }

    #[test]
    fn test_single_failure_in_list_fails_report() {
        let results = ResultsMap {
            tcp: Some(vec![tcp(true), tcp(false), tcp(true)]),
            ..Default::default()
        };
        let report = Report::build(results);
        assert!(!report.ok());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_all_passing_report_is_ok() {
        let results = ResultsMap {
            dns: Some(DnsResult::success(
                "localhost",
                vec!["127.0.0.1".parse().unwrap()],
                Duration::ZERO,
            )),
            tcp: Some(vec![tcp(true), tcp(true)]),
            http: Some(vec![HttpResult::success(
                "http://localhost/",
                500,
                Duration::ZERO,
            )]),
            ..Default::default()
        };
        assert!(Report::build(results).ok());
    }

    #[test]
    fn test_empty_list_is_vacuously_ok() {
        let results = ResultsMap {
            http: Some(vec![]),
            ..Default::default()
        };
        assert!(results.contains(CheckKind::Http));
        assert!(Report::build(results).ok());
    }

    #[test]
    fn test_outcomes_flatten_in_block_order() {
        let results = ResultsMap {
            tls: Some(TlsResult::failure("x", 443, "boom", Duration::ZERO)),
            tcp: Some(vec![tcp(true), tcp(false)]),
            dns: Some(DnsResult::failure("x", "boom", Duration::ZERO)),
            ..Default::default()
        };
        let kinds: Vec<CheckKind> = results.outcomes().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![CheckKind::Dns, CheckKind::Tcp, CheckKind::Tcp, CheckKind::Tls]
        );
        assert_eq!(
            results.kinds(),
            vec![CheckKind::Dns, CheckKind::Tcp, CheckKind::Tls]
        );
    }

    #[test]
    fn test_absent_kinds_are_not_serialized() {
        let results = ResultsMap {
            tcp: Some(vec![tcp(true)]),
            ..Default::default()
        };
        let value = serde_json::to_value(Report::build(results)).unwrap();
        let keys: Vec<&String> = value["results"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["tcp"]);
        assert!(value["results"]["tcp"].is_array());
    }
}
