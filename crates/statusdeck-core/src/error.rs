// ── Core error types ──
//
// User-facing errors from statusdeck-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<statusdeck_api::Error>` impl translates transport-layer
// errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    /// Invalid or incomplete configuration. Raised before any upstream
    /// call or cache mutation.
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach directory at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Directory request timed out")]
    Timeout,

    // ── Upstream errors (wrapped, not exposed raw) ───────────────────
    /// The directory answered but the operation failed. A failed refresh
    /// never touches previously cached values.
    #[error("Directory error: {message}")]
    Upstream {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<statusdeck_api::Error> for CoreError {
    fn from(err: statusdeck_api::Error) -> Self {
        match err {
            statusdeck_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            statusdeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Upstream {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            statusdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            statusdeck_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            statusdeck_api::Error::Status { status, message } => CoreError::Upstream {
                message,
                status: Some(status),
            },
            statusdeck_api::Error::Query { message } => CoreError::Upstream {
                message,
                status: None,
            },
            statusdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
