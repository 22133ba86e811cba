//! ICMP ping checker
//!
//! Runs the operating system's `ping` utility and scrapes its summary. Two
//! output families are understood: Windows (`Packets: Sent = 3, Received = 3`
//! / `Average = 12ms`) and POSIX (`3 packets transmitted, 3 received` /
//! `min/avg/max... = a/b/c`). Anything unrecognised degrades to zero replies
//! and no average.

use crate::config::PingSettings;
use crate::models::PingResult;
use crate::utils::PingError;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::process::Command;

/// Summary values scraped from ping output
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PingStats {
    pub received: u32,
    pub avg_ms: Option<f64>,
}

/// Ping checker
pub struct PingChecker {
    count: u32,
    reply_timeout_secs: u64,
}

impl PingChecker {
    /// Create a ping checker sending `count` echo requests
    pub fn new(count: u32, settings: &PingSettings) -> Self {
        Self {
            count,
            reply_timeout_secs: settings.reply_timeout_secs,
        }
    }

    /// Ping `host` and report replies, loss, and average round trip
    pub async fn check(&self, host: &str) -> PingResult {
        self.run("ping", host).await
    }

    async fn run(&self, program: &str, host: &str) -> PingResult {
        let start = Instant::now();
        let args = ping_args(
            std::env::consts::OS,
            host,
            self.count,
            self.reply_timeout_secs,
        );
        tracing::debug!("ping {}", args.join(" "));

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                let err = PingError::Spawn {
                    message: e.to_string(),
                };
                tracing::warn!("{}", err);
                return PingResult::failure(host, self.count, err, start.elapsed());
            }
        };

        let text = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        let stats = parse_ping_output(&text);

        let result = PingResult::completed(
            host,
            self.count,
            stats.received,
            stats.avg_ms,
            exit_error(output.status),
            start.elapsed(),
        );
        if !result.ok {
            tracing::warn!("ping {} failed: {:?}", host, result.error);
        }
        result
    }
}

/// Describe a non-zero exit of the ping process; `None` on success
fn exit_error(status: ExitStatus) -> Option<String> {
    if status.success() {
        return None;
    }
    let err = match status.code() {
        Some(code) => PingError::ExitStatus { code },
        None => PingError::Terminated,
    };
    Some(err.to_string())
}

/// Command-line arguments for the platform's ping utility
pub fn ping_args(os: &str, host: &str, count: u32, reply_timeout_secs: u64) -> Vec<String> {
    match os {
        "windows" => vec![
            "-n".to_string(),
            count.to_string(),
            "-w".to_string(),
            reply_timeout_secs.saturating_mul(1000).to_string(),
            host.to_string(),
        ],
        // BSD-derived ping takes the per-reply wait in milliseconds
        "macos" | "ios" | "freebsd" => vec![
            "-c".to_string(),
            count.to_string(),
            "-W".to_string(),
            reply_timeout_secs.saturating_mul(1000).to_string(),
            host.to_string(),
        ],
        _ => vec![
            "-c".to_string(),
            count.to_string(),
            "-W".to_string(),
            reply_timeout_secs.to_string(),
            host.to_string(),
        ],
    }
}

/// Scrape received count and average round trip from ping output
pub fn parse_ping_output(output: &str) -> PingStats {
    if output.contains("Received =") && output.contains("Lost =") {
        parse_windows(output)
    } else {
        parse_posix(output)
    }
}

fn parse_windows(output: &str) -> PingStats {
    let received = output
        .split_once("Packets:")
        .and_then(|(_, rest)| rest.split(',').find(|seg| seg.contains("Received")))
        .and_then(|seg| digits(seg).parse().ok())
        .unwrap_or(0);

    let avg_ms = output
        .split_once("Average =")
        .map(|(_, rest)| rest.lines().next().unwrap_or_default())
        .map(digits)
        .and_then(|d| d.parse::<f64>().ok());

    PingStats { received, avg_ms }
}

fn parse_posix(output: &str) -> PingStats {
    let received = output
        .lines()
        .find(|line| line.contains("packets transmitted"))
        .and_then(|line| line.split(',').find(|seg| seg.contains("received")))
        .and_then(|seg| {
            seg.split_whitespace()
                .find_map(|token| token.parse::<u32>().ok())
        })
        .unwrap_or(0);

    let avg_ms = output
        .lines()
        .find(|line| line.contains("min/avg/max"))
        .and_then(|line| line.split_once('='))
        .and_then(|(_, values)| values.split('/').nth(1))
        .and_then(|avg| avg.trim().parse::<f64>().ok());

    PingStats { received, avg_ms }
}

fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}
