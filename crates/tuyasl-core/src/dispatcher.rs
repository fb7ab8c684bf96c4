// ── Request dispatcher ──
//
// Turns host commands into session operations. Each command spawns the
// operation and, independently, a timer that reports the current state
// once `timeout + 100ms` has elapsed, whether or not the operation has
// finished. Overlapping commands are neither queued nor cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::CoreError;
use crate::model::Credentials;
use crate::protocol::{HostCommand, HostEvent};
use crate::session::Session;

/// Added to the command's timeout before the result event fires.
pub const RESPONSE_GRACE: Duration = Duration::from_millis(100);

/// Routes host commands to the shared [`Session`] and emits result events.
///
/// Cheaply cloneable; all clones share the session and event channel.
#[derive(Clone)]
pub struct Dispatcher {
    session: Arc<Session>,
    events: mpsc::Sender<HostEvent>,
}

impl Dispatcher {
    pub fn new(session: Arc<Session>, events: mpsc::Sender<HostEvent>) -> Self {
        Self { session, events }
    }

    /// Start handling one command. Returns immediately; must be called
    /// from within a tokio runtime.
    pub fn handle_command(&self, command: HostCommand) {
        match command {
            HostCommand::Login { config } => {
                let delay = config.timeout + RESPONSE_GRACE;

                let this = self.clone();
                tokio::spawn(async move {
                    if let Err(e) = this.session.login(&config).await {
                        error!(error = %e, "login failed");
                    }
                });

                let this = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let login_data = this.session.credentials().snapshot();
                    this.emit(HostEvent::LoginResult { login_data }).await;
                });
            }
            HostCommand::Search { config } => {
                let delay = config.timeout + RESPONSE_GRACE;

                let this = self.clone();
                tokio::spawn(async move {
                    match this.session.search(&config).await {
                        Ok(count) => debug!(count, "search complete"),
                        Err(e) => this.search_failed(e).await,
                    }
                });

                let this = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let devices = this.session.devices_snapshot().as_ref().clone();
                    this.emit(HostEvent::SearchResult { devices }).await;
                });
            }
        }
    }

    /// Handle commands until the host side of the channel closes.
    ///
    /// Work already started keeps running after this returns.
    pub async fn run(self, mut commands: mpsc::Receiver<HostCommand>) {
        info!("dispatcher started");
        while let Some(command) = commands.recv().await {
            self.handle_command(command);
        }
        info!("command channel closed");
    }

    async fn search_failed(&self, err: CoreError) {
        error!(error = %err, "device discovery failed");
        if err.is_invalid_access_token() {
            warn!("access token rejected, asking host to log in again");
            self.emit(HostEvent::LoginResult {
                login_data: Credentials::failed(),
            })
            .await;
        }
    }

    async fn emit(&self, event: HostEvent) {
        if self.events.send(event).await.is_err() {
            debug!("host event channel closed; dropping event");
        }
    }
}
