//! JSON output formatter

use crate::models::Report;
use crate::utils::ReportError;
use std::path::Path;

/// Serialize a report as 2-space indented JSON
pub fn to_json(report: &Report) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialize {
        message: e.to_string(),
    })
}

/// Write a report as JSON to `path`, replacing any existing file
pub fn write_json_file<P: AsRef<Path>>(report: &Report, path: P) -> Result<(), ReportError> {
    let path = path.as_ref();
    let json = to_json(report)?;
    std::fs::write(path, json).map_err(|e| ReportError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    tracing::debug!("Wrote JSON report to {}", path.display());
    Ok(())
}

/// Print a report as JSON to stdout
pub fn print_json(report: &Report) -> Result<(), ReportError> {
    println!("{}", to_json(report)?);
    Ok(())
}
