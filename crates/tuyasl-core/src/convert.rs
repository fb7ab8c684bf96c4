// ── API-to-domain conversions ──
//
// Bridges raw `tuyasl_api` types into the host-facing model.

use serde_json::Value;

use tuyasl_api::{LoginForm, RemoteDevice, TokenGrant};

use crate::config::LoginConfig;
use crate::model::{Credentials, DeviceRecord};

/// `true` only for the exact string `"true"`.
fn is_true(raw: Option<&Value>) -> bool {
    matches!(raw, Some(Value::String(s)) if s == "true")
}

/// `"true"` → on, `"false"` → off, anything else → unknown.
fn on_off(raw: Option<&Value>) -> Option<bool> {
    match raw {
        Some(Value::String(s)) if s == "true" => Some(true),
        Some(Value::String(s)) if s == "false" => Some(false),
        _ => None,
    }
}

impl From<RemoteDevice> for DeviceRecord {
    fn from(device: RemoteDevice) -> Self {
        Self {
            online: is_true(device.data.online.as_ref()),
            on_off: on_off(device.data.state.as_ref()),
            alias: device.name,
            device_type: device.dev_type,
        }
    }
}

impl TryFrom<Value> for DeviceRecord {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        RemoteDevice::from_value(value).map(Self::from)
    }
}

impl From<TokenGrant> for Credentials {
    fn from(grant: TokenGrant) -> Self {
        Self {
            access_token: Some(grant.access_token),
            refresh_token: grant.refresh_token,
            token_type: grant.token_type,
            expires_in: grant.expires_in,
            success: true,
        }
    }
}

impl From<&LoginConfig> for LoginForm {
    fn from(config: &LoginConfig) -> Self {
        Self {
            user_name: config.user_name.clone(),
            password: config.password.clone(),
            country_code: config.country_code.clone(),
            biz_type: config.biz_type.clone(),
            from: config.from.clone(),
        }
    }
}
