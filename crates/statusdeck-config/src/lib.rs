//! Configuration loading for the statusdeck service.
//!
//! TOML file + environment merge, credential resolution, and translation
//! to `statusdeck_core::ServiceConfig`. The embedding process calls
//! [`load_config`] (or [`load_config_from`]) and hands the result to
//! [`to_service_config`]; the core never reads config files itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use statusdeck_core::ServiceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no directory credential configured (set `credential` or point `credential_env` at a populated environment variable)")]
    NoCredential,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration for the service.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Directory endpoint URL. Required.
    pub endpoint: Option<String>,

    /// Directory credential (plaintext — prefer `credential_env`).
    pub credential: Option<String>,

    /// Environment variable name containing the credential.
    pub credential_env: Option<String>,

    /// Cache freshness window in milliseconds.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Concurrency ceiling for batched identifier resolution.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Page bound for the down/warning list queries.
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path to a custom CA certificate for self-hosted directories.
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    #[serde(default)]
    pub insecure: bool,

    /// Company filter value for the infrastructure counts query.
    #[serde(default = "default_infrastructure_company")]
    pub infrastructure_company: String,

    /// Company filter value for the customer counts query.
    #[serde(default = "default_customer_company")]
    pub customer_company: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            credential: None,
            credential_env: None,
            cache_ttl_ms: default_cache_ttl_ms(),
            fetch_concurrency: default_fetch_concurrency(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
            ca_cert: None,
            insecure: false,
            infrastructure_company: default_infrastructure_company(),
            customer_company: default_customer_company(),
        }
    }
}

fn default_cache_ttl_ms() -> u64 {
    60_000
}
fn default_fetch_concurrency() -> usize {
    5
}
fn default_page_size() -> i64 {
    100
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_infrastructure_company() -> String {
    "Infrastructure".into()
}
fn default_customer_company() -> String {
    "Customer".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `STATUSDECK_CONFIG` if set, otherwise
/// `statusdeck.toml` in the working directory.
pub fn config_path() -> PathBuf {
    std::env::var_os("STATUSDECK_CONFIG")
        .map_or_else(|| PathBuf::from("statusdeck.toml"), PathBuf::from)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full `Config` from the canonical file path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(config_path())
}

/// Load the full `Config` from an explicit file path + environment.
///
/// Precedence, lowest to highest: built-in defaults, TOML file,
/// `STATUSDECK_`-prefixed environment variables.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path.as_ref()))
        .merge(Env::prefixed("STATUSDECK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the directory credential from the configured chain.
///
/// 1. `credential_env` → environment variable lookup
/// 2. Plaintext `credential` in the config
pub fn resolve_credential(config: &Config) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = config.credential_env {
        if let Ok(val) = std::env::var(env_name) {
            if !val.is_empty() {
                return Ok(SecretString::from(val));
            }
        }
    }

    if let Some(ref credential) = config.credential {
        return Ok(SecretString::from(credential.clone()));
    }

    Err(ConfigError::NoCredential)
}

// ── Translation to the runtime config ───────────────────────────────

/// Build a `ServiceConfig` from a loaded `Config`.
///
/// Fails fast on a missing/invalid endpoint or an unresolvable
/// credential — before the service makes any upstream call.
pub fn to_service_config(config: &Config) -> Result<ServiceConfig, ConfigError> {
    let raw_endpoint = config
        .endpoint
        .as_deref()
        .ok_or_else(|| ConfigError::Validation {
            field: "endpoint".into(),
            reason: "directory endpoint is required".into(),
        })?;
    let endpoint: url::Url = raw_endpoint.parse().map_err(|_| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {raw_endpoint}"),
    })?;

    let credential = resolve_credential(config)?;

    let tls = if config.insecure {
        statusdeck_api::TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = config.ca_cert {
        statusdeck_api::TlsMode::CustomCa(ca_path.clone())
    } else {
        statusdeck_api::TlsMode::System
    };

    let mut service = ServiceConfig::new(endpoint, credential);
    service.cache_ttl = Duration::from_millis(config.cache_ttl_ms);
    service.fetch_concurrency = config.fetch_concurrency;
    service.page_size = config.page_size;
    service.timeout = Duration::from_secs(config.timeout_secs);
    service.tls = tls;
    service.infrastructure_company = config.infrastructure_company.clone();
    service.customer_company = config.customer_company.clone();
    Ok(service)
}
