//! DNS resolution checker
//!
//! Resolves a hostname through the system resolver configuration.

use crate::models::DnsResult;
use crate::utils::DnsError;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::Resolver;
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Type alias for the Tokio async resolver
type TokioResolver = Resolver<TokioConnectionProvider>;

/// DNS checker backed by the system resolver
pub struct DnsChecker {
    timeout: Duration,
}

impl DnsChecker {
    /// Create a new DNS checker with the given query timeout
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Resolve `hostname` and report every address found
    pub async fn check(&self, hostname: &str) -> DnsResult {
        let start = Instant::now();

        match self.resolve(hostname).await {
            Ok(addresses) => {
                tracing::debug!("{} resolved to {} address(es)", hostname, addresses.len());
                DnsResult::success(hostname, addresses, start.elapsed())
            }
            Err(e) => {
                tracing::warn!("{}", e);
                DnsResult::failure(hostname, e, start.elapsed())
            }
        }
    }

    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DnsError> {
        // Literals need no resolver, nor a readable system config
        if let Ok(ip) = hostname.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| DnsError::ResolverUnavailable {
                message: e.to_string(),
            })?
            .build();

        match tokio::time::timeout(self.timeout, resolver.lookup_ip(hostname)).await {
            Ok(Ok(lookup)) => Ok(lookup.iter().collect()),
            Ok(Err(e)) => Err(DnsError::ResolutionFailed {
                hostname: hostname.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(DnsError::Timeout {
                hostname: hostname.to_string(),
            }),
        }
    }
}
