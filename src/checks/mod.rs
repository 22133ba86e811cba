//! Check modules for netcheck
//!
//! One checker per probe kind. Every `check` call enforces its own deadline,
//! measures its own elapsed time, and folds any failure into the returned
//! result record instead of propagating it.

pub mod dns;
pub mod http;
pub mod ping;
pub mod tcp;
pub mod tls;

pub use dns::DnsChecker;
pub use http::HttpChecker;
pub use ping::{parse_ping_output, ping_args, PingChecker, PingStats};
pub use tcp::TcpChecker;
pub use tls::{expiry_from_der, TlsChecker};
