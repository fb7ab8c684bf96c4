#![allow(clippy::unwrap_used, clippy::expect_used)]
// Dispatcher timing and event tests. Delays are real but short.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{Fixture, discovery_success, grant, login_config, search_config, setup};
use tuyasl_core::{Credentials, DeviceRecord, Dispatcher, HostCommand, HostEvent};

// ── Helpers ─────────────────────────────────────────────────────────

fn dispatcher(fx: &Fixture) -> (Dispatcher, mpsc::Receiver<HostEvent>) {
    let (tx, rx) = mpsc::channel(16);
    (Dispatcher::new(Arc::clone(&fx.session), tx), rx)
}

async fn next_event(rx: &mut mpsc::Receiver<HostEvent>) -> HostEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for host event")
        .expect("event channel closed")
}

async fn assert_no_event(rx: &mut mpsc::Receiver<HostEvent>, within: Duration) {
    if let Ok(Some(event)) = tokio::time::timeout(within, rx.recv()).await {
        panic!("unexpected host event: {event:?}");
    }
}

fn login_token(event: &HostEvent) -> Option<String> {
    match event {
        HostEvent::LoginResult { login_data } => login_data.access_token.clone(),
        HostEvent::SearchResult { .. } => panic!("expected login result, got {event:?}"),
    }
}

// ── LOGIN ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_reports_credentials_after_fixed_delay() {
    let fx = setup().await;
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/auth.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("EUtoken")))
        .mount(&fx.server)
        .await;

    let started = Instant::now();
    dispatcher.handle_command(HostCommand::Login {
        config: login_config("alice", 200),
    });
    let event = next_event(&mut rx).await;

    assert!(started.elapsed() >= Duration::from_millis(300));
    let HostEvent::LoginResult { login_data } = event else {
        panic!("expected login result");
    };
    assert!(login_data.success);
    assert_eq!(login_data.access_token.as_deref(), Some("EUtoken"));
}

#[tokio::test]
async fn test_timed_out_login_reports_unchanged_snapshot() {
    let fx = setup().await;
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/auth.do"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(grant("EUlate"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&fx.server)
        .await;

    // The request gives up at 50ms; the timer then reports the reset state.
    dispatcher.handle_command(HostCommand::Login {
        config: login_config("alice", 50),
    });

    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::LoginResult {
            login_data: Credentials::failed()
        }
    );
}

#[tokio::test]
async fn test_zero_timeout_login_reports_before_request_finishes() {
    let fx = setup().await;
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/auth.do"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(grant("EUpatient"))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(1)
        .mount(&fx.server)
        .await;

    dispatcher.handle_command(HostCommand::Login {
        config: login_config("alice", 0),
    });

    // Timer fires at the grace period while the request is still pending.
    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::LoginResult {
            login_data: Credentials::failed()
        }
    );

    // No per-request limit, so the slow response still lands.
    tokio::time::sleep(Duration::from_millis(700)).await;
    let creds = fx.session.credentials().snapshot();
    assert!(creds.success);
    assert_eq!(creds.access_token.as_deref(), Some("EUpatient"));
}

#[tokio::test]
async fn test_overlapping_logins_last_response_wins() {
    let fx = setup().await;
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/auth.do"))
        .and(body_string_contains("userName=slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(grant("EUslow"))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&fx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/homeassistant/auth.do"))
        .and(body_string_contains("userName=fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("EUfast")))
        .mount(&fx.server)
        .await;

    dispatcher.handle_command(HostCommand::Login {
        config: login_config("slow", 600),
    });
    dispatcher.handle_command(HostCommand::Login {
        config: login_config("fast", 600),
    });

    let first = next_event(&mut rx).await;
    let second = next_event(&mut rx).await;

    assert_eq!(login_token(&first).as_deref(), Some("EUslow"));
    assert_eq!(login_token(&second).as_deref(), Some("EUslow"));
    assert_eq!(
        fx.session.credentials().snapshot().access_token.as_deref(),
        Some("EUslow")
    );
    assert_eq!(std::fs::read_to_string(fx.token_path()).unwrap(), "EUslow");
}

// ── SEARCH ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_reports_sorted_devices() {
    let fx = setup().await;
    std::fs::write(fx.token_path(), "EUtoken").unwrap();
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/skill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_success(json!([
            { "name": "B", "dev_type": "x", "data": { "online": "true", "state": "true" } },
            { "name": "a", "dev_type": "y", "data": { "online": "false", "state": "bogus" } }
        ]))))
        .mount(&fx.server)
        .await;

    dispatcher.handle_command(HostCommand::Search {
        config: search_config(200),
    });

    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::SearchResult {
            devices: vec![
                DeviceRecord {
                    alias: "a".into(),
                    device_type: "y".into(),
                    online: false,
                    on_off: None,
                },
                DeviceRecord {
                    alias: "B".into(),
                    device_type: "x".into(),
                    online: true,
                    on_off: Some(true),
                },
            ]
        }
    );
}

#[tokio::test]
async fn test_search_without_login_reports_empty_list() {
    let fx = setup().await;
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/skill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_success(json!([]))))
        .expect(0)
        .mount(&fx.server)
        .await;

    dispatcher.handle_command(HostCommand::Search {
        config: search_config(100),
    });

    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::SearchResult { devices: vec![] }
    );
}

#[tokio::test]
async fn test_invalid_token_asks_host_to_log_in_again() {
    let fx = setup().await;
    std::fs::write(fx.token_path(), "EUstale").unwrap();
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/skill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "header": { "code": "InvalidAccessTokenError" }
        })))
        .mount(&fx.server)
        .await;

    dispatcher.handle_command(HostCommand::Search {
        config: search_config(300),
    });

    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::LoginResult {
            login_data: Credentials::failed()
        }
    );
    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::SearchResult { devices: vec![] }
    );
}

#[tokio::test]
async fn test_other_failure_codes_do_not_notify_login() {
    let fx = setup().await;
    std::fs::write(fx.token_path(), "EUtoken").unwrap();
    let (dispatcher, mut rx) = dispatcher(&fx);

    Mock::given(method("POST"))
        .and(path("/homeassistant/skill"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "header": { "code": "FrequentlyInvoke" }
        })))
        .mount(&fx.server)
        .await;

    dispatcher.handle_command(HostCommand::Search {
        config: search_config(200),
    });

    assert_eq!(
        next_event(&mut rx).await,
        HostEvent::SearchResult { devices: vec![] }
    );
    assert_no_event(&mut rx, Duration::from_millis(200)).await;
}

// ── Channel driver ──────────────────────────────────────────────────

#[tokio::test]
async fn test_run_handles_commands_until_channel_closes() {
    let fx = setup().await;
    let (dispatcher, mut rx) = dispatcher(&fx);
    let (cmd_tx, cmd_rx) = mpsc::channel(4);

    Mock::given(method("POST"))
        .and(path("/homeassistant/auth.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(grant("EUtoken")))
        .mount(&fx.server)
        .await;

    let runner = tokio::spawn(dispatcher.run(cmd_rx));
    cmd_tx
        .send(HostCommand::Login {
            config: login_config("alice", 100),
        })
        .await
        .unwrap();
    drop(cmd_tx);

    runner.await.unwrap();
    assert_eq!(login_token(&next_event(&mut rx).await).as_deref(), Some("EUtoken"));
}
