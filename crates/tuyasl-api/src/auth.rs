// Home Assistant login
//
// Exchanges account credentials for an access token. The endpoint answers
// 200 for both outcomes; a `responseStatus` field marks a rejection.

use std::time::Duration;

use tracing::debug;

use crate::client::TuyaClient;
use crate::error::Error;
use crate::models::{AuthResponse, LoginForm, TokenGrant};

impl TuyaClient {
    /// Authenticate with user name and password.
    ///
    /// `POST /homeassistant/auth.do` (form-encoded)
    pub async fn login(&self, form: &LoginForm, timeout: Duration) -> Result<TokenGrant, Error> {
        let url = self.endpoint("auth.do")?;
        debug!(user = %form.user_name, country = %form.country_code, "logging in");

        let resp = self
            .post(url, timeout)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = Self::ok_body(resp).await?;

        match Self::decode::<AuthResponse>(&body)? {
            AuthResponse::Rejected {
                response_status,
                error_msg,
            } => Err(Error::AuthRejected {
                status: match response_status {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                },
                message: error_msg.unwrap_or_default(),
            }),
            AuthResponse::Granted(grant) => {
                debug!("login successful");
                Ok(grant)
            }
        }
    }
}
