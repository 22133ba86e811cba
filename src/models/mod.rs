//! Data models for netcheck
//!
//! This module contains the per-probe result records and the report they fold into.

pub mod report;
pub mod results;

pub use report::{CheckKind, Report, ResultsMap};
pub use results::{
    days_remaining, loss_percentage, DnsResult, HttpResult, Outcome, PingResult, TcpResult,
    TlsResult,
};
