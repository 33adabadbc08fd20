//! Shared state for one command run.

use std::path::PathBuf;

use threadline_client::{ApiClient, ClientConfig};
use threadline_storefront::auth::AuthSession;
use threadline_storefront::storage::SessionStore;
use tracing::debug;

use crate::error::Result;

/// Environment variable naming the state directory.
pub const STATE_DIR_VAR: &str = "THREADLINE_STATE_DIR";

/// State directory used when [`STATE_DIR_VAR`] is unset.
pub const DEFAULT_STATE_DIR: &str = ".threadline";

/// API client plus the on-disk session.
pub struct Context {
    pub client: ApiClient,
    pub store: SessionStore,
}

impl Context {
    /// Build the client from the environment and load any saved token.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is missing or the state files are
    /// unreadable.
    pub async fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let client = ApiClient::new(&config)?;
        let dir = state_dir(std::env::var_os(STATE_DIR_VAR).map(PathBuf::from));
        let store = SessionStore::in_dir(&dir);
        if let Some(token) = store.token()? {
            client.set_token(token).await;
        }
        debug!(state_dir = %dir.display(), "Context ready");
        Ok(Self { client, store })
    }

    /// Auth actions over this context.
    #[must_use]
    pub fn auth(&self) -> AuthSession {
        AuthSession::new(self.client.clone(), self.store.clone())
    }
}

fn state_dir(configured: Option<PathBuf>) -> PathBuf {
    configured
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}
