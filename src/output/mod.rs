//! Output formatting module
//!
//! Provides:
//! - The plain-text console report
//! - JSON export
//! - Terminal helpers (spinner, error line)

pub mod json;
pub mod terminal;
pub mod text;

pub use json::{print_json, to_json, write_json_file};
pub use terminal::{create_spinner, print_error};
pub use text::{format_console, print_report};
