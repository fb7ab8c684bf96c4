// ── Core error types ──
//
// Errors surfaced by session operations. Consumers never see raw HTTP or
// JSON failures; the `From<tuyasl_api::Error>` impl folds them into the
// transport / protocol kinds.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Remote ───────────────────────────────────────────────────────
    #[error("Cannot reach Tuya cloud: {reason}")]
    Transport { reason: String, timed_out: bool },

    #[error("Login rejected by Tuya cloud: {message}")]
    AuthenticationFailed { message: String },

    #[error("Unexpected response from Tuya cloud: {message}")]
    Protocol {
        message: String,
        /// Remote failure code (e.g. `header.code` of a discovery response).
        code: Option<String>,
    },

    #[error("Access token rejected by Tuya cloud -- login required")]
    InvalidAccessToken,

    // ── Local state ──────────────────────────────────────────────────
    #[error("Access token unavailable at {}: {source}", .path.display())]
    CredentialUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to persist access token to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` if the host should re-authenticate.
    pub fn is_invalid_access_token(&self) -> bool {
        matches!(self, Self::InvalidAccessToken)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tuyasl_api::Error> for CoreError {
    fn from(err: tuyasl_api::Error) -> Self {
        match err {
            tuyasl_api::Error::Transport(e) => CoreError::Transport {
                timed_out: e.is_timeout(),
                reason: e.to_string(),
            },
            tuyasl_api::Error::Tls(reason) => CoreError::Transport {
                reason,
                timed_out: false,
            },
            tuyasl_api::Error::HttpStatus { status, body } => CoreError::Transport {
                reason: format!("HTTP {status}: {body}"),
                timed_out: false,
            },
            tuyasl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tuyasl_api::Error::AuthRejected { status, message } => {
                CoreError::AuthenticationFailed {
                    message: if message.is_empty() { status } else { message },
                }
            }
            ref e @ tuyasl_api::Error::Discovery { .. } if e.is_invalid_access_token() => {
                CoreError::InvalidAccessToken
            }
            tuyasl_api::Error::Discovery { code, message } => CoreError::Protocol {
                message: message.unwrap_or_else(|| format!("discovery failed ({code})")),
                code: Some(code),
            },
            tuyasl_api::Error::Deserialization { message, body: _ } => CoreError::Protocol {
                message,
                code: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_code_maps_to_dedicated_variant() {
        let err = CoreError::from(tuyasl_api::Error::Discovery {
            code: "InvalidAccessTokenError".into(),
            message: None,
        });
        assert!(err.is_invalid_access_token());
    }

    #[test]
    fn other_discovery_codes_are_protocol_errors() {
        let err = CoreError::from(tuyasl_api::Error::Discovery {
            code: "FrequentlyInvoke".into(),
            message: None,
        });
        assert!(
            matches!(err, CoreError::Protocol { code: Some(ref c), .. } if c == "FrequentlyInvoke")
        );
    }

    #[test]
    fn http_status_is_a_transport_error() {
        let err = CoreError::from(tuyasl_api::Error::HttpStatus {
            status: 502,
            body: "bad gateway".into(),
        });
        assert!(matches!(err, CoreError::Transport { ref reason, timed_out: false } if reason.contains("502")));
    }

    #[test]
    fn rejection_without_message_keeps_status() {
        let err = CoreError::from(tuyasl_api::Error::AuthRejected {
            status: "error".into(),
            message: String::new(),
        });
        assert!(matches!(err, CoreError::AuthenticationFailed { ref message } if message == "error"));
    }
}
