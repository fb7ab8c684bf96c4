// Tuya cloud HTTP client
//
// Wraps `reqwest::Client` with region-aware URL construction. The auth and
// discovery endpoints live in their own files as inherent methods.

use reqwest::header::USER_AGENT as USER_AGENT_HEADER;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::region::Region;
use crate::transport::{TransportConfig, USER_AGENT};

/// Raw HTTP client for one region's Home Assistant API host.
pub struct TuyaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TuyaClient {
    /// Create a client for `region` from a `TransportConfig`.
    pub fn new(region: Region, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&region.base_url())?;
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` and an explicit
    /// base URL (proxies, mock servers).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/homeassistant/{path}`, keeping any path prefix of the base.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/homeassistant/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Ok(Url::parse(&full)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a POST with the fixed user agent and a per-request timeout.
    ///
    /// A zero timeout sets no per-request limit; only the client-wide
    /// ceiling from `TransportConfig` applies.
    pub(crate) fn post(&self, url: Url, timeout: std::time::Duration) -> reqwest::RequestBuilder {
        debug!("POST {}", url);
        let request = self.http.post(url).header(USER_AGENT_HEADER, USER_AGENT);
        if timeout.is_zero() {
            request
        } else {
            request.timeout(timeout)
        }
    }

    /// Read the body of a response, failing on anything but `200 OK`.
    pub(crate) async fn ok_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        resp.text().await.map_err(Error::Transport)
    }

    /// Decode a JSON body, keeping the raw text on failure.
    pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, Error> {
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.to_owned(),
        })
    }
}
