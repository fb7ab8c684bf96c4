// Request and response schemas for the Home Assistant endpoints
//
// The auth endpoint signals failure in-band: a 200 response carrying a
// `responseStatus` field is a rejection. Discovery wraps everything in a
// `{ header: { code }, payload }` envelope. Device entries stay as raw JSON
// here so one bad entry cannot poison the whole list; callers convert
// them individually.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

// ── Auth ─────────────────────────────────────────────────────────────

/// Form body of `POST /homeassistant/auth.do`. Values are sent verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub user_name: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
    pub country_code: String,
    pub biz_type: String,
    pub from: String,
}

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Token material returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Body of a 200 response from the auth endpoint.
///
/// Variant order matters: `Rejected` is tried first because a rejection
/// may still carry token-shaped fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AuthResponse {
    Rejected {
        #[serde(rename = "responseStatus")]
        response_status: serde_json::Value,
        #[serde(default, rename = "errorMsg")]
        error_msg: Option<String>,
    },
    Granted(TokenGrant),
}

// ── Discovery ────────────────────────────────────────────────────────

/// `header` of a skill request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillHeader {
    pub name: &'static str,
    pub namespace: &'static str,
    pub payload_version: u32,
}

/// `payload` of a skill request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPayload<'a> {
    pub access_token: &'a str,
}

/// Body of `POST /homeassistant/skill`.
#[derive(Debug, Clone, Serialize)]
pub struct SkillRequest<'a> {
    pub header: SkillHeader,
    pub payload: SkillPayload<'a>,
}

impl<'a> SkillRequest<'a> {
    /// The fixed discovery envelope.
    pub fn discovery(access_token: &'a str) -> Self {
        Self {
            header: SkillHeader {
                name: "Discovery",
                namespace: "discovery",
                payload_version: 1,
            },
            payload: SkillPayload { access_token },
        }
    }
}

/// Response envelope of the skill endpoint.
#[derive(Debug, Deserialize)]
pub struct SkillResponse {
    pub header: ResponseHeader,
    #[serde(default)]
    pub payload: Option<DiscoveryPayload>,
}

/// `header` of a skill response. `code == "SUCCESS"` means success.
#[derive(Debug, Deserialize)]
pub struct ResponseHeader {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Discovery payload. Devices stay untyped until converted one by one.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryPayload {
    #[serde(default)]
    pub devices: Vec<serde_json::Value>,
}

/// A single device entry as the cloud reports it.
///
/// `online` and `state` are usually the strings `"true"`/`"false"`, but
/// sensors omit `state` and some firmware sends other shapes, so both
/// are kept as raw values.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDevice {
    pub name: String,
    #[serde(default)]
    pub dev_type: String,
    pub data: RemoteDeviceData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteDeviceData {
    #[serde(default)]
    pub online: Option<serde_json::Value>,
    #[serde(default)]
    pub state: Option<serde_json::Value>,
}

impl RemoteDevice {
    /// Decode a single entry of `payload.devices`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn auth_response_with_status_is_rejected() {
        let body = json!({
            "responseStatus": "error",
            "errorMsg": "password wrong",
            "access_token": "should-be-ignored"
        });
        match serde_json::from_value::<AuthResponse>(body).unwrap() {
            AuthResponse::Rejected { response_status, error_msg } => {
                assert_eq!(response_status, json!("error"));
                assert_eq!(error_msg.as_deref(), Some("password wrong"));
            }
            AuthResponse::Granted(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn auth_response_without_status_is_granted() {
        let body = json!({
            "access_token": "EUheu1",
            "refresh_token": "EUheu2",
            "token_type": "bearer",
            "expires_in": 864_000
        });
        let AuthResponse::Granted(grant) = serde_json::from_value(body).unwrap() else {
            panic!("expected grant");
        };
        assert_eq!(grant.access_token, "EUheu1");
        assert_eq!(grant.refresh_token.as_deref(), Some("EUheu2"));
        assert_eq!(grant.token_type.as_deref(), Some("bearer"));
        assert_eq!(grant.expires_in, Some(864_000));
    }

    #[test]
    fn auth_response_without_token_fails_to_parse() {
        let body = json!({ "token_type": "bearer" });
        assert!(serde_json::from_value::<AuthResponse>(body).is_err());
    }

    #[test]
    fn discovery_request_matches_fixed_envelope() {
        let body = serde_json::to_value(SkillRequest::discovery("tok")).unwrap();
        assert_eq!(
            body,
            json!({
                "header": { "name": "Discovery", "namespace": "discovery", "payloadVersion": 1 },
                "payload": { "accessToken": "tok" }
            })
        );
    }

    #[test]
    fn remote_device_requires_name_and_data() {
        assert!(RemoteDevice::from_value(json!({ "dev_type": "switch", "data": {} })).is_err());
        assert!(RemoteDevice::from_value(json!({ "name": "Lamp", "dev_type": "light" })).is_err());

        let device =
            RemoteDevice::from_value(json!({ "name": "Lamp", "data": { "online": true } })).unwrap();
        assert_eq!(device.dev_type, "");
        assert_eq!(device.data.online, Some(json!(true)));
        assert_eq!(device.data.state, None);
    }
}
