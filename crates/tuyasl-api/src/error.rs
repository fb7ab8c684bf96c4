use thiserror::Error;

/// Top-level error type for the `tuyasl-api` crate.
///
/// Covers every failure mode of the two cloud endpoints: transport,
/// HTTP status, the auth rejection convention, and discovery failure codes.
/// `tuyasl-core` maps these into its own error kinds.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The endpoint answered with something other than `200 OK`.
    #[error("HTTP response is not successful ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    // ── Auth ────────────────────────────────────────────────────────
    /// The auth endpoint answered 200 but carried a `responseStatus` field.
    #[error("Login rejected ({status}): {message}")]
    AuthRejected { status: String, message: String },

    // ── Discovery ───────────────────────────────────────────────────
    /// The skill endpoint answered with `header.code != "SUCCESS"`.
    #[error("Discovery failed ({code})")]
    Discovery { code: String, message: Option<String> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the remote rejected the access token used for discovery.
    pub fn is_invalid_access_token(&self) -> bool {
        matches!(self, Self::Discovery { code, .. } if code == crate::discovery::INVALID_ACCESS_TOKEN)
    }
}
