// Shared fixtures for session and dispatcher tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

use tuyasl_api::TuyaClient;
use tuyasl_core::{CredentialStore, LoginConfig, Region, SearchConfig, Session};

pub struct Fixture {
    pub server: MockServer,
    pub session: Arc<Session>,
    pub dir: TempDir,
}

impl Fixture {
    pub fn token_path(&self) -> PathBuf {
        self.session.credentials().token_path().to_path_buf()
    }
}

pub async fn setup() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    setup_with_token_path(dir.path().join("token.txt"), dir).await
}

pub async fn setup_with_token_path(token_path: PathBuf, dir: TempDir) -> Fixture {
    let server = MockServer::start().await;
    let client = TuyaClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
    );
    let session = Arc::new(Session::with_client(
        Region::Eu,
        client,
        CredentialStore::new(token_path),
    ));
    Fixture {
        server,
        session,
        dir,
    }
}

pub fn login_config(user_name: &str, timeout_ms: u64) -> LoginConfig {
    LoginConfig {
        user_name: user_name.into(),
        password: SecretString::from("s3cret".to_string()),
        country_code: "39".into(),
        biz_type: "smart_life".into(),
        from: "tuya".into(),
        timeout: Duration::from_millis(timeout_ms),
    }
}

pub fn search_config(timeout_ms: u64) -> SearchConfig {
    SearchConfig {
        timeout: Duration::from_millis(timeout_ms),
    }
}

pub fn grant(token: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "refresh_token": format!("{token}-refresh"),
        "token_type": "bearer",
        "expires_in": 864_000
    })
}

pub fn discovery_success(devices: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "header": { "code": "SUCCESS", "payloadVersion": 1 },
        "payload": { "devices": devices }
    })
}
