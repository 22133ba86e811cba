//! Utility modules for netcheck
//!
//! This module contains error types and small numeric helpers.

pub mod error;

pub use error::{
    ConfigError, DnsError, HttpError, PingError, ReportError, Result, TcpError, TlsError,
    ToolkitError, UsageError,
};

/// Clamp `n` into the inclusive range `[lo, hi]`
pub fn clamp<T: Ord>(n: T, lo: T, hi: T) -> T {
    n.max(lo).min(hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(0, 1, 10), 1);
        assert_eq!(clamp(5, 1, 10), 5);
        assert_eq!(clamp(42, 1, 10), 10);
    }
}
