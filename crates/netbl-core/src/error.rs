// ── Core error types ──
//
// User-facing errors from netbl-core. Consumers never see raw reqwest
// errors or JSON parse failures -- `CoreError::from_api` translates
// transport-layer errors into domain-appropriate variants.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl CoreError {
    /// Translate a transport-layer error.
    ///
    /// `timeout` is the configured request timeout, reported back in
    /// the message when the request timed out.
    pub fn from_api(err: netbl_api::Error, timeout: Duration) -> Self {
        match err {
            netbl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            netbl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            netbl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            netbl_api::Error::Api { message, status } => {
                if status == 404 {
                    CoreError::NotFound {
                        entity_type: "Resource".into(),
                        identifier: message,
                    }
                } else {
                    CoreError::Api {
                        message,
                        status: Some(status),
                    }
                }
            }
            netbl_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
