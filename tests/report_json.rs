use chrono::{TimeZone, Utc};
use netcheck::models::{DnsResult, PingResult, TcpResult, TlsResult};
use netcheck::output::{to_json, write_json_file};
use netcheck::{Outcome, Report, ResultsMap};
use std::time::Duration;

fn sample_results() -> ResultsMap {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let expiry = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

    ResultsMap {
        dns: Some(DnsResult::success(
            "example.com",
            vec!["93.184.216.34".parse().unwrap()],
            Duration::from_millis(12),
        )),
        ping: Some(PingResult::completed(
            "1.1.1.1",
            4,
            2,
            Some(10.5),
            None,
            Duration::from_millis(2040),
        )),
        tcp: Some(vec![
            TcpResult::success("example.com", 443, Duration::from_millis(20)),
            TcpResult::failure("example.com", 81, "refused", Duration::from_millis(1)),
        ]),
        tls: Some(TlsResult::success(
            "example.com",
            443,
            expiry,
            now,
            Duration::from_millis(80),
        )),
        ..Default::default()
    }
}

#[test]
fn test_json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = Report::build(sample_results());

    write_json_file(&report, &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let parsed: Report = serde_json::from_str(&content).unwrap();

    assert_eq!(parsed, report);
    assert!(!parsed.ok());
    assert_eq!(parsed.exit_code(), 1);
}

#[test]
fn test_json_file_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, "x".repeat(10_000)).unwrap();

    let report = Report::build(ResultsMap::default());
    write_json_file(&report, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, to_json(&report).unwrap());
}

#[test]
fn test_unrequested_kinds_are_absent() {
    let json = to_json(&Report::build(sample_results())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let results = value["results"].as_object().unwrap();

    assert!(results.contains_key("dns"));
    assert!(results.contains_key("tcp"));
    assert!(!results.contains_key("http"));
    assert_eq!(results["tls"]["days_left"], 59);
    assert!(results["tls"]["not_after"].as_str().unwrap().starts_with("2026-03-01T12:00:00"));
}

#[test]
fn test_ok_results_carry_no_error() {
    let results = sample_results();
    for (_, outcome) in results.outcomes() {
        if outcome.ok() {
            assert!(outcome.error().is_none());
        } else {
            assert!(outcome.error().is_some());
        }
    }
}

#[test]
fn test_loss_pct_bounds() {
    for transmitted in 0..=10u32 {
        for received in 0..=transmitted {
            let result = PingResult::completed(
                "host",
                transmitted,
                received,
                None,
                None,
                Duration::ZERO,
            );
            assert!((0.0..=100.0).contains(&result.loss_pct));
            assert_eq!(result.ok, received > 0);
        }
    }
}

#[test]
fn test_missing_output_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.json");
    let report = Report::build(ResultsMap::default());
    assert!(write_json_file(&report, &path).is_err());
}
