//! Command-line interface module
//!
//! This module handles CLI argument parsing using Clap.

pub mod args;

pub use args::{parse_tcp_targets, parse_url_list, Cli, PING_COUNT_RANGE};
