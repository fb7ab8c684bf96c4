// ── Domain model ──
//
// What the host sees: the login snapshot and the normalized device list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of the last login, as reported to the host.
///
/// The initial and failed state is `{ "success": false }`; token fields are
/// omitted from the JSON when absent.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    pub success: bool,
}

impl Credentials {
    /// The `{ success: false }` state.
    pub fn failed() -> Self {
        Self::default()
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("success", &self.success)
            .finish()
    }
}

/// One device as shown in the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub alias: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub online: bool,
    /// `None` for devices without a binary state (sensors).
    pub on_off: Option<bool>,
}

/// Sort by alias, case-insensitively, keeping the order of equal aliases.
pub fn sort_devices(devices: &mut [DeviceRecord]) {
    devices.sort_by_cached_key(|d| d.alias.to_lowercase());
}
