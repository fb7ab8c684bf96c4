// ── Runtime configuration ──
//
// Per-command configuration as the host sends it, plus the session-wide
// options fixed at startup. Core never reads config files; the binary (or
// any other host) constructs these and hands them in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use url::Url;

use tuyasl_api::TransportConfig;

/// Where the access token is mirrored when no other path is configured.
pub const DEFAULT_TOKEN_PATH: &str = "/tmp/mmm-tuyasl-token.txt";

/// Configuration carried by a LOGIN command.
///
/// Field names follow the host's camelCase payload; `timeout` is in milliseconds.
/// A `timeout` of 0 means no per-request limit; the result event still
/// fires after the 100ms grace period.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfig {
    pub user_name: String,
    #[serde(deserialize_with = "secret_string")]
    pub password: SecretString,
    pub country_code: String,
    pub biz_type: String,
    pub from: String,
    #[serde(deserialize_with = "millis")]
    pub timeout: Duration,
}

/// Configuration carried by a SEARCH command. Other fields are ignored.
///
/// `timeout` is in milliseconds; 0 means no per-request limit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(deserialize_with = "millis")]
    pub timeout: Duration,
}

/// Session-wide options, fixed for the life of a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Country code the region is resolved from.
    pub country_code: String,
    /// File the access token is mirrored to.
    pub token_path: PathBuf,
    /// Replaces the region's API host (proxies, test servers).
    pub endpoint: Option<Url>,
    pub transport: TransportConfig,
}

impl SessionOptions {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            endpoint: None,
            transport: TransportConfig::default(),
        }
    }
}

fn secret_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}
