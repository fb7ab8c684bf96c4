// ── Session ──
//
// The single per-process context: resolved region, HTTP client,
// credential store and device cache. Shared by every in-flight command;
// writes are last-writer-wins with no ordering between commands.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use tuyasl_api::{LoginForm, Region, TuyaClient, resolve_region};

use crate::config::{LoginConfig, SearchConfig, SessionOptions};
use crate::credentials::CredentialStore;
use crate::error::CoreError;
use crate::model::{Credentials, DeviceRecord, sort_devices};

pub struct Session {
    region: Region,
    client: TuyaClient,
    credentials: CredentialStore,
    devices: watch::Sender<Arc<Vec<DeviceRecord>>>,
}

impl Session {
    /// Resolve the region and build the HTTP client. Credentials start reset.
    pub fn new(options: SessionOptions) -> Result<Self, CoreError> {
        let region = resolve_region(&options.country_code);
        info!(%region, "using Tuya region");

        let client = match options.endpoint {
            Some(endpoint) => {
                debug!(%endpoint, "API host overridden");
                TuyaClient::with_client(options.transport.build_client()?, endpoint)
            }
            None => TuyaClient::new(region, &options.transport)?,
        };

        Ok(Self::with_client(
            region,
            client,
            CredentialStore::new(options.token_path),
        ))
    }

    /// Assemble a session from prebuilt parts.
    pub fn with_client(region: Region, client: TuyaClient, credentials: CredentialStore) -> Self {
        credentials.reset();
        let (devices, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            region,
            client,
            credentials,
            devices,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// The device list from the latest search, sorted by alias.
    pub fn devices_snapshot(&self) -> Arc<Vec<DeviceRecord>> {
        Arc::clone(&self.devices.borrow())
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Log in and store the resulting credentials.
    ///
    /// On failure the previous credentials stay in place. A token that
    /// cannot be written to disk is logged; the login still counts.
    pub async fn login(&self, config: &LoginConfig) -> Result<Credentials, CoreError> {
        let form = LoginForm::from(config);
        let grant = self.client.login(&form, config.timeout).await?;

        let credentials = Credentials::from(grant);
        self.credentials.replace(credentials.clone());
        info!("login successful");

        if let Some(token) = credentials.access_token.as_deref() {
            if let Err(e) = self.credentials.save(token).await {
                warn!(error = %e, "could not persist access token");
            }
        }

        Ok(credentials)
    }

    /// Rebuild the device cache from a discovery call.
    ///
    /// The cache is cleared first, so any failure leaves it empty. Without
    /// a persisted token no request is made. Entries that fail to convert
    /// are skipped. Returns the number of devices stored.
    pub async fn search(&self, config: &SearchConfig) -> Result<usize, CoreError> {
        debug!("getting device list");
        self.devices.send_replace(Arc::new(Vec::new()));

        let token = self.credentials.load_token().await?;
        let entries = self.client.discover(&token, config.timeout).await?;

        let mut devices: Vec<DeviceRecord> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match DeviceRecord::try_from(entry) {
                Ok(device) => Some(device),
                Err(e) => {
                    warn!(index, error = %e, "skipping malformed device entry");
                    None
                }
            })
            .collect();
        sort_devices(&mut devices);

        let count = devices.len();
        self.devices.send_replace(Arc::new(devices));
        debug!(count, "device list refreshed");
        Ok(count)
    }
}
