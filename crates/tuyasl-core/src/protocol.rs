//! Host message protocol.
//!
//! Every message is a JSON object tagged by `notification` with the body
//! under `payload`:
//!
//! ```json
//! { "notification": "TUYASL_NETWORK_SEARCH", "payload": { "config": { "timeout": 3000 } } }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{LoginConfig, SearchConfig};
use crate::model::{Credentials, DeviceRecord};

/// Commands sent from the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "notification", content = "payload")]
pub enum HostCommand {
    /// Log in with the given account.
    #[serde(rename = "TUYASL_NETWORK_LOGIN")]
    Login { config: LoginConfig },

    /// Refresh the device list with the persisted token.
    #[serde(rename = "TUYASL_NETWORK_SEARCH")]
    Search { config: SearchConfig },
}

/// Events sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notification", content = "payload")]
pub enum HostEvent {
    /// Login snapshot. Also sent with `success: false` when a search finds
    /// the token rejected, prompting the host to log in again.
    #[serde(rename = "TUYASL_NETWORK_LOGIN_RESULT")]
    LoginResult {
        #[serde(rename = "loginData")]
        login_data: Credentials,
    },

    /// Device list, sorted by alias.
    #[serde(rename = "TUYASL_NETWORK_SEARCH_RESULT")]
    SearchResult { devices: Vec<DeviceRecord> },
}
