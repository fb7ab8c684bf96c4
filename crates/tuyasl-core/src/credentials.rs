// ── Credential store ──
//
// In-memory login snapshot plus a single on-disk mirror of the access
// token. The two are only in sync after a login completes; the file
// outlives the process, the snapshot does not.

use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::Credentials;

/// Holder of the last login result and its persisted access token.
pub struct CredentialStore {
    token_path: PathBuf,
    current: watch::Sender<Credentials>,
}

impl CredentialStore {
    /// Create a store in the reset (`success: false`) state.
    pub fn new(token_path: impl Into<PathBuf>) -> Self {
        let (current, _) = watch::channel(Credentials::failed());
        Self {
            token_path: token_path.into(),
            current,
        }
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// Forget the in-memory credentials. The token file is left alone.
    pub fn reset(&self) {
        self.current.send_replace(Credentials::failed());
    }

    /// Replace the in-memory credentials wholesale.
    pub fn replace(&self, credentials: Credentials) {
        self.current.send_replace(credentials);
    }

    pub fn snapshot(&self) -> Credentials {
        self.current.borrow().clone()
    }

    /// Overwrite the token file with the raw token.
    pub async fn save(&self, token: &str) -> Result<(), CoreError> {
        tokio::fs::write(&self.token_path, token)
            .await
            .map_err(|source| CoreError::Persistence {
                path: self.token_path.clone(),
                source,
            })?;
        debug!(path = %self.token_path.display(), "access token saved");
        Ok(())
    }

    /// Read the persisted token, trimmed. A missing or empty file is unavailable.
    pub async fn load_token(&self) -> Result<String, CoreError> {
        let unavailable = |source| CoreError::CredentialUnavailable {
            path: self.token_path.clone(),
            source,
        };

        let raw = tokio::fs::read_to_string(&self.token_path)
            .await
            .map_err(unavailable)?;

        let token = raw.trim();
        if token.is_empty() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::InvalidData,
                "token file is empty",
            )));
        }
        Ok(token.to_owned())
    }
}
