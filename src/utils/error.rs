//! Custom error types for netcheck
//!
//! Probe-level errors (`DnsError`, `TcpError`, `HttpError`, `TlsError`,
//! `PingError`) never leave their checker: they are rendered into the
//! `error` string of the result record. The remaining types surface to the
//! binary and decide the exit code.

use thiserror::Error;

/// Top-level error type for the netcheck application
#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolkitError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolkitError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Malformed command-line input, detected before any probe is dispatched
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Invalid tcp target: {target} (expected host:port)")]
    InvalidTcpTarget { target: String },

    #[error("Invalid port in tcp target {target}: {port}")]
    InvalidPort { target: String, port: String },

    #[error("Invalid ping host: {host}")]
    InvalidPingHost { host: String },

    #[error("No checks requested: pass at least one of --dns, --ping, --tcp, --http, --tls")]
    NoChecks,
}

/// DNS resolution errors
#[derive(Error, Debug)]
pub enum DnsError {
    #[error("DNS query timed out for {hostname}")]
    Timeout { hostname: String },

    #[error("Failed to create system resolver: {message}")]
    ResolverUnavailable { message: String },

    #[error("DNS resolution failed for {hostname}: {message}")]
    ResolutionFailed { hostname: String, message: String },
}

/// TCP connection errors
#[derive(Error, Debug)]
pub enum TcpError {
    #[error("Connection refused to {host}:{port}")]
    ConnectionRefused { host: String, port: u16 },

    #[error("Connection timed out to {host}:{port}")]
    Timeout { host: String, port: u16 },

    #[error("Host unreachable: {host}")]
    HostUnreachable { host: String },

    #[error("Network unreachable")]
    NetworkUnreachable,

    #[error("TCP connection failed to {host}:{port}: {message}")]
    ConnectionFailed {
        host: String,
        port: u16,
        message: String,
    },
}

/// HTTP transport errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    #[error("Failed to build HTTP client: {message}")]
    ClientBuild { message: String },

    #[error("HTTP request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },
}

/// TLS handshake and certificate errors
#[derive(Error, Debug)]
pub enum TlsError {
    #[error("Invalid server name: {host}")]
    InvalidServerName { host: String },

    #[error("TCP connection to {host}:{port} failed: {message}")]
    ConnectionError {
        host: String,
        port: u16,
        message: String,
    },

    #[error("TLS handshake timed out")]
    Timeout,

    #[error("TLS handshake failed: {message}")]
    HandshakeFailed { message: String },

    #[error("Server presented no certificate")]
    NoCertificate,

    #[error("no notAfter")]
    MissingExpiry,

    #[error("Failed to parse certificate: {message}")]
    ParseError { message: String },
}

/// Ping process errors
#[derive(Error, Debug)]
pub enum PingError {
    #[error("Failed to run ping: {message}")]
    Spawn { message: String },

    #[error("ping exited with status {code}")]
    ExitStatus { code: i32 },

    #[error("ping terminated by signal")]
    Terminated,

    #[error("no replies received from {host}")]
    NoReplies { host: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Report persistence errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },

    #[error("Failed to write report to {path}: {message}")]
    WriteError { path: String, message: String },
}

/// Result type alias using ToolkitError
pub type Result<T> = std::result::Result<T, ToolkitError>;
