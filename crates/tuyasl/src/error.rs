//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use tuyasl_config::ConfigError;
use tuyasl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Tuya cloud")]
    #[diagnostic(
        code(tuyasl::connection_failed),
        help(
            "{reason}\n\
             Check network access, or the `endpoint` / `ca_cert` settings."
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(tuyasl::timeout),
        help("{reason}\nIncrease timeout with --timeout or `timeout_ms`.")
    )]
    Timeout { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login rejected: {message}")]
    #[diagnostic(
        code(tuyasl::auth_failed),
        help(
            "Verify user_name, the password and country_code.\n\
             Run: tuyasl config set-password"
        )
    )]
    AuthFailed { message: String },

    #[error("Access token rejected by the Tuya cloud")]
    #[diagnostic(code(tuyasl::token_rejected), help("Run: tuyasl login"))]
    TokenRejected,

    #[error("Not logged in: no access token at {path}")]
    #[diagnostic(code(tuyasl::not_logged_in), help("Run: tuyasl login"))]
    NotLoggedIn { path: String },

    #[error("No password configured for '{user_name}'")]
    #[diagnostic(
        code(tuyasl::no_credentials),
        help(
            "Store one with: tuyasl config set-password\n\
             Or set the TUYASL_PASSWORD environment variable."
        )
    )]
    NoCredentials { user_name: String },

    #[error("Keyring error: {reason}")]
    #[diagnostic(code(tuyasl::keyring))]
    Keyring { reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Unexpected response from the Tuya cloud: {message}")]
    #[diagnostic(code(tuyasl::api_error))]
    ApiError { message: String },

    #[error("Could not save the access token to {path}")]
    #[diagnostic(code(tuyasl::persistence), help("Check `token_path` in the config."))]
    Persistence {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No {field} configured")]
    #[diagnostic(
        code(tuyasl::no_config),
        help(
            "Create a config with: tuyasl config init\n\
             Expected at: {path}"
        )
    )]
    MissingSetting { field: String, path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tuyasl::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(tuyasl::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(tuyasl::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. }
            | Self::TokenRejected
            | Self::NotLoggedIn { .. }
            | Self::NoCredentials { .. }
            | Self::Keyring { .. } => exit_code::AUTH,
            Self::MissingSetting { .. } | Self::Validation { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport {
                reason,
                timed_out: true,
            } => CliError::Timeout { reason },
            CoreError::Transport { reason, .. } => CliError::ConnectionFailed { reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::InvalidAccessToken => CliError::TokenRejected,
            CoreError::Protocol { message, code } => CliError::ApiError {
                message: match code {
                    Some(code) => format!("{message} [{code}]"),
                    None => message,
                },
            },
            CoreError::CredentialUnavailable { path, .. } => CliError::NotLoggedIn {
                path: path.display().to_string(),
            },
            CoreError::Persistence { path, source } => CliError::Persistence {
                path: path.display().to_string(),
                source,
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Missing { field } => CliError::MissingSetting {
                field: field.into(),
                path: tuyasl_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { user_name } => CliError::NoCredentials { user_name },
            ConfigError::Keyring(e) => CliError::Keyring {
                reason: e.to_string(),
            },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
