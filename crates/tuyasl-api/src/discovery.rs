// Home Assistant skill: device discovery

use std::time::Duration;

use tracing::debug;

use crate::client::TuyaClient;
use crate::error::Error;
use crate::models::{SkillRequest, SkillResponse};

/// `header.code` of a successful skill response.
pub const SUCCESS: &str = "SUCCESS";

/// `header.code` returned when the access token expired or was revoked.
pub const INVALID_ACCESS_TOKEN: &str = "InvalidAccessTokenError";

impl TuyaClient {
    /// List the account's devices.
    ///
    /// `POST /homeassistant/skill` with the Discovery envelope. Returns the
    /// raw `payload.devices` entries; a missing array is an empty list.
    pub async fn discover(
        &self,
        access_token: &str,
        timeout: Duration,
    ) -> Result<Vec<serde_json::Value>, Error> {
        let url = self.endpoint("skill")?;

        let resp = self
            .post(url, timeout)
            .json(&SkillRequest::discovery(access_token))
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = Self::ok_body(resp).await?;
        let envelope: SkillResponse = Self::decode(&body)?;

        if envelope.header.code != SUCCESS {
            return Err(Error::Discovery {
                code: envelope.header.code,
                message: envelope.header.msg,
            });
        }

        let devices = envelope.payload.unwrap_or_default().devices;
        debug!(count = devices.len(), "discovery returned devices");
        Ok(devices)
    }
}
