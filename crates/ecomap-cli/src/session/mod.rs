//! Session wiring: credential file, navigator and API client.

mod navigator;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use ecomap_core::{ApiUrl, CredentialStore};
use ecomap_file::FileCredentialStore;
use ecomap_http::{AuthenticatedHttpClient, ClientConfig, EcoMapApi};

pub use navigator::TerminalNavigator;

use crate::cli::ConnectionArgs;

/// Message for commands that need a stored session.
pub const NO_SESSION: &str = "No active session. Run 'ecomap login' first.";

/// An API handle bound to the on-disk credential file.
pub struct CliSession {
    pub api: EcoMapApi,
    pub store: FileCredentialStore,
}

impl CliSession {
    /// Build the client from connection arguments.
    pub fn connect(args: &ConnectionArgs) -> Result<Self> {
        let base_url = ApiUrl::new(&args.api_url).context("Invalid API URL")?;

        let mut config = ClientConfig::new(base_url);
        if let Some(secs) = args.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        let path = storage::credentials_path(args.data_dir.as_deref())?;
        tracing::debug!(path = %path.display(), "using credential file");
        let store = FileCredentialStore::new(path);

        let client = AuthenticatedHttpClient::new(
            config,
            Arc::new(store.clone()),
            Arc::new(TerminalNavigator),
        )
        .context("Failed to build HTTP client")?;

        Ok(Self {
            api: EcoMapApi::new(client),
            store,
        })
    }

    /// Whether any access token is stored.
    pub async fn has_credentials(&self) -> Result<bool> {
        let token = self
            .store
            .access_token()
            .await
            .context("Failed to read credentials")?;
        Ok(token.is_some())
    }

    /// Fail with a login hint unless a session is stored.
    pub async fn require_credentials(&self) -> Result<()> {
        if !self.has_credentials().await? {
            anyhow::bail!(NO_SESSION);
        }
        Ok(())
    }
}
