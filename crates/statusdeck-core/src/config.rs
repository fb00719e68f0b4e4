// ── Runtime service configuration ──
//
// Describes *how* to reach the directory and how the aggregation layer
// behaves. Carries credential data and tuning, but never touches disk —
// the embedding process (or statusdeck-config) constructs a
// `ServiceConfig` and hands it in.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::CoreError;

/// How long a cached query result stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(60_000);

/// Page bound for the down/warning list queries.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Configuration for a single `StatusService` instance.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory endpoint (e.g. `https://directory.example.net/query`).
    pub endpoint: Url,
    /// Directory credential, sent as a bearer token.
    pub credential: SecretString,
    /// Freshness window for every cache instance.
    pub cache_ttl: Duration,
    /// Concurrency ceiling for batched identifier resolution.
    pub fetch_concurrency: usize,
    /// Page bound passed to the down/warning list queries.
    pub page_size: i64,
    /// Request timeout (pass-through to the HTTP transport).
    pub timeout: Duration,
    /// TLS verification for the directory endpoint.
    pub tls: statusdeck_api::TlsMode,
    /// Company filter value for the infrastructure counts query.
    pub infrastructure_company: String,
    /// Company filter value for the customer counts query.
    pub customer_company: String,
}

impl ServiceConfig {
    /// Build a config with defaults for everything but the required
    /// endpoint and credential.
    pub fn new(endpoint: Url, credential: SecretString) -> Self {
        Self {
            endpoint,
            credential,
            cache_ttl: DEFAULT_CACHE_TTL,
            fetch_concurrency: crate::fetch::DEFAULT_CONCURRENCY,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            tls: statusdeck_api::TlsMode::System,
            infrastructure_company: "Infrastructure".into(),
            customer_company: "Customer".into(),
        }
    }

    /// Fail fast on configuration that cannot produce a working service.
    /// Runs before any upstream call or cache mutation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.credential.expose_secret().trim().is_empty() {
            return Err(CoreError::Config {
                message: "directory credential is empty".into(),
            });
        }
        if self.fetch_concurrency == 0 {
            return Err(CoreError::Config {
                message: "fetch_concurrency must be at least 1".into(),
            });
        }
        if self.page_size <= 0 {
            return Err(CoreError::Config {
                message: format!("page_size must be positive, got {}", self.page_size),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> ServiceConfig {
        ServiceConfig::new(
            "https://directory.example.net/query".parse().unwrap(),
            SecretString::from("token".to_string()),
        )
    }

    #[test]
    fn defaults_match_contract() {
        let cfg = base();
        assert_eq!(cfg.cache_ttl, Duration::from_millis(60_000));
        assert_eq!(cfg.fetch_concurrency, 5);
        cfg.validate().unwrap();
    }

    #[test]
    fn empty_credential_fails_fast() {
        let mut cfg = base();
        cfg.credential = SecretString::from(String::new());
        assert!(matches!(
            cfg.validate(),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let mut cfg = base();
        cfg.fetch_concurrency = 0;
        assert!(cfg.validate().is_err());
    }
}
