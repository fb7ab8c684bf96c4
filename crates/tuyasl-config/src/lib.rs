//! Configuration for tuyasl.
//!
//! A single TOML file plus `TUYASL_*` environment overrides, password
//! resolution (env + keyring + plaintext), and translation into the
//! `tuyasl_core` session and command configs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tuyasl_core::{
    DEFAULT_TOKEN_PATH, LoginConfig, SearchConfig, SessionOptions, TlsMode, TransportConfig,
};

/// Keyring service name.
const KEYRING_SERVICE: &str = "tuyasl";

/// Environment variable checked for the password when `password_env` is unset or empty.
pub const PASSWORD_ENV: &str = "TUYASL_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {field} configured")]
    Missing { field: &'static str },

    #[error("no password configured for '{user_name}'")]
    NoCredentials { user_name: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Country code; selects the API region and is sent with the login.
    #[serde(default)]
    pub country_code: String,

    /// Account user name (e-mail or phone number).
    pub user_name: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    #[serde(default = "default_biz_type")]
    pub biz_type: String,

    #[serde(default = "default_from")]
    pub from: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Where the access token is mirrored.
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,

    /// Replaces `https://px1.tuya{region}.com`.
    pub endpoint: Option<String>,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country_code: String::new(),
            user_name: None,
            password: None,
            password_env: None,
            biz_type: default_biz_type(),
            from: default_from(),
            timeout_ms: default_timeout_ms(),
            token_path: default_token_path(),
            endpoint: None,
            ca_cert: None,
        }
    }
}

fn default_biz_type() -> String {
    "smart_life".into()
}
fn default_from() -> String {
    "tuya".into()
}
fn default_timeout_ms() -> u64 {
    3000
}
fn default_token_path() -> PathBuf {
    PathBuf::from(DEFAULT_TOKEN_PATH)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "tuyasl", "tuyasl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tuyasl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file yields defaults.
///
/// `TUYASL_PASSWORD` is not merged here; [`resolve_password`] handles it so
/// the keyring keeps precedence over plaintext.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TUYASL_").ignore(&["password"]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(user_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{user_name}/password"),
    )?)
}

/// Store a password in the system keyring.
pub fn store_password(user_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(user_name)?.set_password(password)?;
    Ok(())
}

/// Resolve the account password.
///
/// Order: `password_env` variable, `TUYASL_PASSWORD`, system keyring,
/// plaintext in the config.
pub fn resolve_password(cfg: &Config) -> Result<SecretString, ConfigError> {
    let user_name = cfg
        .user_name
        .as_deref()
        .ok_or(ConfigError::Missing { field: "user_name" })?;

    // 1. Env vars
    let env_names = cfg.password_env.as_deref().into_iter().chain([PASSWORD_ENV]);
    for name in env_names {
        if let Ok(pw) = std::env::var(name) {
            if !pw.is_empty() {
                return Ok(SecretString::from(pw));
            }
        }
    }

    // 2. Keyring
    if let Ok(entry) = keyring_entry(user_name) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = cfg.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        user_name: user_name.into(),
    })
}

// ── Translation to core types ───────────────────────────────────────

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Session options fixed at startup.
    pub fn session_options(&self) -> Result<SessionOptions, ConfigError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(|raw| {
                raw.parse::<url::Url>().map_err(|e| ConfigError::Validation {
                    field: "endpoint".into(),
                    reason: format!("invalid URL '{raw}': {e}"),
                })
            })
            .transpose()?;

        let tls = match self.ca_cert {
            Some(ref path) => TlsMode::CustomCa(path.clone()),
            None => TlsMode::System,
        };

        Ok(SessionOptions {
            country_code: self.country_code.clone(),
            token_path: self.token_path.clone(),
            endpoint,
            transport: TransportConfig {
                tls,
                ..TransportConfig::default()
            },
        })
    }

    /// A LOGIN command config. Requires a user name and a resolvable password.
    pub fn login_config(&self) -> Result<LoginConfig, ConfigError> {
        let password = resolve_password(self)?;
        let user_name = self
            .user_name
            .clone()
            .ok_or(ConfigError::Missing { field: "user_name" })?;

        Ok(LoginConfig {
            user_name,
            password,
            country_code: self.country_code.clone(),
            biz_type: self.biz_type.clone(),
            from: self.from.clone(),
            timeout: self.timeout(),
        })
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            timeout: self.timeout(),
        }
    }
}
