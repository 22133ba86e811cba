//! Command implementations for netcheck

pub mod check;

pub use check::run_check;
