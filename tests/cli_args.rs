use clap::Parser;
use netcheck::utils::UsageError;
use netcheck::{Cli, HostPort, Settings, ToolkitError};

#[test]
fn test_malformed_tcp_target_exits_with_usage_code() {
    let cli = Cli::parse_from(["netcheck", "--tcp", "google.com:443,bad-target"]);
    let err = cli.plan(&Settings::default()).unwrap_err();

    assert_eq!(
        err,
        UsageError::InvalidTcpTarget {
            target: "bad-target".to_string()
        }
    );
    assert_eq!(ToolkitError::from(err).exit_code(), 2);
}

#[test]
fn test_no_flags_has_no_checks() {
    let cli = Cli::parse_from(["netcheck"]);
    assert!(!cli.has_checks());
    assert_eq!(cli.plan(&Settings::default()), Err(UsageError::NoChecks));
}

#[test]
fn test_ping_count_default_and_clamp() {
    let cli = Cli::parse_from(["netcheck", "--ping", "1.1.1.1"]);
    let plan = cli.plan(&Settings::default()).unwrap();
    assert_eq!(plan.ping.unwrap().count, 3);

    let cli = Cli::parse_from(["netcheck", "--ping", "1.1.1.1", "--ping-count", "-2"]);
    let plan = cli.plan(&Settings::default()).unwrap();
    assert_eq!(plan.ping.unwrap().count, 1);
}

#[test]
fn test_timeout_override_applies_to_every_probe() {
    let cli = Cli::parse_from(["netcheck", "--dns", "example.com", "--timeout", "1.5"]);
    let settings = cli.settings().unwrap();

    assert_eq!(settings.dns.timeout_secs, 1.5);
    assert_eq!(settings.tcp.timeout_secs, 1.5);
    assert_eq!(settings.http.timeout_secs, 1.5);
    assert_eq!(settings.tls.timeout_secs, 1.5);
    assert_eq!(settings.ping.reply_timeout_secs, 2);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let cli = Cli::parse_from([
        "netcheck",
        "--dns",
        "example.com",
        "--config",
        "does/not/exist.toml",
    ]);
    assert!(cli.settings().is_err());
}

#[test]
fn test_huge_timeout_is_config_error() {
    let cli = Cli::parse_from(["netcheck", "--dns", "example.com", "--timeout", "1e300"]);
    let err = ToolkitError::from(cli.settings().unwrap_err());
    assert!(matches!(err, ToolkitError::Config(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_default_cli_targets_https_port() {
    let cli = Cli {
        tls: Some("github.com".to_string()),
        ..Default::default()
    };
    let plan = cli.plan(&Settings::default()).unwrap();
    assert_eq!(plan.tls, Some(HostPort::new("github.com", 443)));
}
