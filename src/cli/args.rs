//! CLI argument definitions using clap

use crate::config::{load_settings, Settings};
use crate::runner::{CheckPlan, HostPort, PingTarget};
use crate::utils::{clamp, ConfigError, UsageError};
use clap::Parser;
use std::path::PathBuf;

/// Smallest and largest accepted `--ping-count`
pub const PING_COUNT_RANGE: (i64, i64) = (1, 10);

#[derive(Parser, Debug)]
#[command(name = "netcheck")]
#[command(version)]
#[command(
    about = "Network diagnostics: DNS, TCP, HTTP(S), TLS expiry, ping + JSON report",
    long_about = None
)]
pub struct Cli {
    /// Hostname to resolve (ex: google.com)
    #[arg(long, value_name = "HOSTNAME")]
    pub dns: Option<String>,

    /// Host to ping (ex: 1.1.1.1 or google.com)
    #[arg(long = "ping", value_name = "HOST")]
    pub ping_host: Option<String>,

    /// Number of echo requests, clamped to 1..=10 (default: 3)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub ping_count: Option<i64>,

    /// Comma list of host:port (ex: google.com:443,1.1.1.1:53)
    #[arg(long, value_name = "HOST:PORT,...")]
    pub tcp: Option<String>,

    /// Comma list of URLs (ex: https://example.com,https://github.com)
    #[arg(long, value_name = "URL,...")]
    pub http: Option<String>,

    /// Host for TLS expiry (ex: github.com)
    #[arg(long, value_name = "HOST")]
    pub tls: Option<String>,

    /// Port for the TLS check
    #[arg(long, default_value_t = 443)]
    pub tls_port: u16,

    /// Write JSON report to a file (ex: report.json)
    #[arg(long, value_name = "FILE")]
    pub json_out: Option<PathBuf>,

    /// Print the JSON report to stdout instead of the text report
    #[arg(long)]
    pub json: bool,

    /// HTTP method for --http requests (default: GET)
    #[arg(long, value_name = "METHOD")]
    pub http_method: Option<String>,

    /// Override every probe timeout, in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Settings file (default: config/default.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Default for Cli {
    /// Same values clap produces for an empty command line
    fn default() -> Self {
        Self {
            dns: None,
            ping_host: None,
            ping_count: None,
            tcp: None,
            http: None,
            tls: None,
            tls_port: 443,
            json_out: None,
            json: false,
            http_method: None,
            timeout: None,
            config: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl Cli {
    /// Whether any check flag was supplied
    pub fn has_checks(&self) -> bool {
        [&self.dns, &self.ping_host, &self.tcp, &self.http, &self.tls]
            .iter()
            .any(|flag| non_blank(flag.as_deref()).is_some())
    }

    /// Load settings and apply command-line overrides
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = load_settings(self.config.as_ref())?;

        if let Some(method) = &self.http_method {
            settings.http.method = method.clone();
        }

        if let Some(timeout) = self.timeout {
            settings = settings.with_timeout(timeout)?;
        }

        Ok(settings)
    }

    /// Turn the flags into a check plan; malformed targets are rejected here
    pub fn plan(&self, settings: &Settings) -> Result<CheckPlan, UsageError> {
        let tcp = match non_blank(self.tcp.as_deref()) {
            Some(list) => parse_tcp_targets(list)?,
            None => vec![],
        };

        let http = non_blank(self.http.as_deref())
            .map(parse_url_list)
            .unwrap_or_default();

        let ping = match non_blank(self.ping_host.as_deref()) {
            // Would be read by the ping utility as an option
            Some(host) if host.starts_with('-') => {
                return Err(UsageError::InvalidPingHost {
                    host: host.to_string(),
                })
            }
            Some(host) => {
                let requested = self
                    .ping_count
                    .unwrap_or_else(|| i64::from(settings.ping.count));
                let (lo, hi) = PING_COUNT_RANGE;
                Some(PingTarget {
                    host: host.to_string(),
                    count: clamp(requested, lo, hi) as u32,
                })
            }
            None => None,
        };

        let plan = CheckPlan {
            dns: non_blank(self.dns.as_deref()).map(str::to_string),
            ping,
            tcp,
            http,
            tls: non_blank(self.tls.as_deref()).map(|host| HostPort::new(host, self.tls_port)),
        };

        if plan.is_empty() {
            return Err(UsageError::NoChecks);
        }

        Ok(plan)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a comma list of `host:port` entries
///
/// Entries are trimmed and empty entries skipped. The split happens at the
/// last colon, so `[::1]:443` works; brackets are stripped from the host.
pub fn parse_tcp_targets(list: &str) -> Result<Vec<HostPort>, UsageError> {
    let mut out = Vec::new();

    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (host, port) = item
            .rsplit_once(':')
            .ok_or_else(|| UsageError::InvalidTcpTarget {
                target: item.to_string(),
            })?;

        let host = host.trim();
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);
        if host.is_empty() {
            return Err(UsageError::InvalidTcpTarget {
                target: item.to_string(),
            });
        }

        let port = port.trim().parse::<u16>().map_err(|_| UsageError::InvalidPort {
            target: item.to_string(),
            port: port.trim().to_string(),
        })?;

        out.push(HostPort::new(host, port));
    }

    Ok(out)
}

/// Parse a comma list of URLs, trimming entries and skipping empty ones
pub fn parse_url_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
