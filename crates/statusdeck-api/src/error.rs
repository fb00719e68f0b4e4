use thiserror::Error;

/// Top-level error type for the `statusdeck-api` crate.
///
/// Covers every failure mode of a directory round trip: credential
/// rejection, transport, non-success HTTP statuses, query errors reported
/// inside a 200 response, and undecodable bodies. `statusdeck-core` maps
/// these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credential rejected by the directory (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Directory responses ─────────────────────────────────────────
    /// Non-success HTTP status from the directory endpoint.
    #[error("Directory error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// The directory accepted the request but reported query errors
    /// in the response envelope.
    #[error("Query rejected by directory: {message}")]
    Query { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the credential was rejected
    /// and the operation cannot succeed without reconfiguration.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error that a later request
    /// might not hit. This crate never retries; callers decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
