//! Check command implementation

use crate::cli::Cli;
use crate::models::Report;
use crate::output::{create_spinner, print_json, print_report, write_json_file};
use crate::runner::run_checks;
use crate::utils::{Result, UsageError};
use clap::CommandFactory;

/// Exit code for a usage problem (no checks, malformed target)
pub const USAGE_EXIT_CODE: i32 = 2;

/// Run the requested checks, print the report and return the process exit code
///
/// With no check flags the help text is printed and the usage code returned.
/// Otherwise the exit code is 0 when every check passed and 1 when any failed.
pub async fn run_check(cli: &Cli) -> Result<i32> {
    if !cli.has_checks() {
        Cli::command().print_help()?;
        println!();
        return Ok(USAGE_EXIT_CODE);
    }

    let settings = cli.settings()?;
    let plan = match cli.plan(&settings) {
        Ok(plan) => plan,
        Err(UsageError::NoChecks) => {
            Cli::command().print_help()?;
            println!();
            return Ok(USAGE_EXIT_CODE);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Running {} check(s)", plan.len());

    let spinner = create_spinner(&format!("Running {} check(s)...", plan.len()));
    let results = run_checks(&plan, &settings).await;
    spinner.finish_and_clear();

    let report = Report::build(results);

    if cli.json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    if let Some(path) = &cli.json_out {
        write_json_file(&report, path)?;
        if !cli.json {
            println!("JSON written to: {}", path.display());
        }
    }

    Ok(report.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[tokio::test]
    async fn test_no_flags_is_usage_exit() {
        let code = run_check(&Cli::default()).await.unwrap();
        assert_eq!(code, USAGE_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_bad_tcp_target_is_usage_error() {
        let cli = Cli {
            tcp: Some("bad-target".to_string()),
            ..Default::default()
        };
        let err = run_check(&cli).await.unwrap_err();
        assert_eq!(err.exit_code(), USAGE_EXIT_CODE);
    }

    #[tokio::test]
    async fn test_writes_json_and_exit_code_follows_results() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");

        let cli = Cli {
            tcp: Some(format!("127.0.0.1:{port}")),
            json_out: Some(out.clone()),
            json: true,
            ..Default::default()
        };
        let code = run_check(&cli).await.unwrap();
        assert_eq!(code, 0);

        let written: Report = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert!(written.ok());
        assert_eq!(written.results().tcp.as_ref().map(Vec::len), Some(1));
    }
}
