//! Human-readable report formatter
//!
//! Blocks are rendered in fixed order (DNS, PING, TCP, HTTP, TLS), each only
//! when its check was requested.

use crate::models::{
    CheckKind, DnsResult, HttpResult, Outcome, PingResult, Report, TcpResult, TlsResult,
};
use chrono::SecondsFormat;
use console::style;

const DETAIL_INDENT: &str = "      ";

/// Render a report as plain text
pub fn format_console(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "NetCheck — status: {}",
        if report.ok() { "OK" } else { "ISSUES" }
    ));
    lines.push(format!(
        "Generated: {}",
        report
            .generated_at()
            .to_rfc3339_opts(SecondsFormat::AutoSi, true)
    ));
    lines.push(String::new());

    let results = report.results();
    for kind in results.kinds() {
        block(&mut lines, kind.title());
        match kind {
            CheckKind::Dns => results.dns.iter().for_each(|r| dns_lines(&mut lines, r)),
            CheckKind::Ping => results.ping.iter().for_each(|r| ping_lines(&mut lines, r)),
            CheckKind::Tcp => results
                .tcp
                .iter()
                .flatten()
                .for_each(|r| tcp_lines(&mut lines, r)),
            CheckKind::Http => results
                .http
                .iter()
                .flatten()
                .for_each(|r| http_lines(&mut lines, r)),
            CheckKind::Tls => results.tls.iter().for_each(|r| tls_lines(&mut lines, r)),
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Print a report to stdout, coloring status words when the terminal allows
pub fn print_report(report: &Report) {
    for line in format_console(report).lines() {
        println!("{}", colorize(line));
    }
}

fn colorize(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("FAIL  ") {
        format!("{}  {}", style("FAIL").red().bold(), rest)
    } else if let Some(rest) = line.strip_prefix("OK  ") {
        format!("{}  {}", style("OK").green().bold(), rest)
    } else if let Some(head) = line.strip_suffix("status: ISSUES") {
        format!("{}status: {}", style(head).bold(), style("ISSUES").red().bold())
    } else if let Some(head) = line.strip_suffix("status: OK") {
        format!("{}status: {}", style(head).bold(), style("OK").green().bold())
    } else {
        line.to_string()
    }
}

fn block(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

fn status_word(outcome: &dyn Outcome) -> &'static str {
    if outcome.ok() {
        "OK"
    } else {
        "FAIL"
    }
}

fn push_error(lines: &mut Vec<String>, outcome: &dyn Outcome) {
    if let Some(error) = outcome.error() {
        lines.push(format!("{}{}", DETAIL_INDENT, error));
    }
}

fn dns_lines(lines: &mut Vec<String>, r: &DnsResult) {
    lines.push(format!(
        "{}  {}  {}  ({:.1} ms)",
        status_word(r),
        r.hostname,
        r.ips.join(", "),
        r.elapsed_ms
    ));
    push_error(lines, r);
}

fn ping_lines(lines: &mut Vec<String>, r: &PingResult) {
    let avg = r
        .avg_ms
        .map(|avg| format!("avg={:.1} ms ", avg))
        .unwrap_or_default();
    lines.push(format!(
        "{}  {}  rx={}/{} loss={:.1}% {}({:.1} ms)",
        status_word(r),
        r.host,
        r.received,
        r.transmitted,
        r.loss_pct,
        avg,
        r.elapsed_ms
    ));
    push_error(lines, r);
}

fn tcp_lines(lines: &mut Vec<String>, r: &TcpResult) {
    lines.push(format!(
        "{}  {}:{}  ({:.1} ms)",
        status_word(r),
        r.host,
        r.port,
        r.elapsed_ms
    ));
    push_error(lines, r);
}

fn http_lines(lines: &mut Vec<String>, r: &HttpResult) {
    let status = r
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    lines.push(format!(
        "{}  {}  status={}  ({:.1} ms)",
        status_word(r),
        r.url,
        status,
        r.elapsed_ms
    ));
    push_error(lines, r);
}

fn tls_lines(lines: &mut Vec<String>, r: &TlsResult) {
    let days = r
        .days_left
        .map(|d| format!("{} days left  ", d))
        .unwrap_or_default();
    lines.push(format!(
        "{}  {}:{}  {}({:.1} ms)",
        status_word(r),
        r.host,
        r.port,
        days,
        r.elapsed_ms
    ));
    if let Some(not_after) = r.not_after {
        lines.push(format!(
            "{}expires: {}",
            DETAIL_INDENT,
            not_after.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        ));
    }
    push_error(lines, r);
}
