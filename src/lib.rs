//! NetCheck Library
//!
//! Concurrent network diagnostics:
//! - DNS resolution of a hostname to its unique addresses
//! - ICMP echo through the system `ping` utility
//! - TCP connect probes
//! - HTTP(S) requests (any status counts as reachable)
//! - TLS leaf certificate expiry
//!
//! Results are aggregated into a [`Report`] that renders as console text or
//! JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use netcheck::{run_checks, CheckPlan, Report, Settings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let plan = CheckPlan {
//!         dns: Some("example.com".to_string()),
//!         ..Default::default()
//!     };
//!     let results = run_checks(&plan, &Settings::default()).await;
//!     let report = Report::build(results);
//!     println!("{}", netcheck::output::format_console(&report));
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod output;
pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Settings;
pub use models::{CheckKind, Outcome, Report, ResultsMap};
pub use runner::{run_checks, CheckPlan, HostPort, PingTarget};
pub use utils::{Result, ToolkitError};
