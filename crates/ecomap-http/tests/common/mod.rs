//! Shared fixtures for the mock-server tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ecomap_core::{
    AccessToken, ApiUrl, CredentialStore, MemoryCredentialStore, Navigator, RefreshToken, Result,
    TokenPair,
};
use ecomap_http::{AuthenticatedHttpClient, ClientConfig, EcoMapApi};
use wiremock::MockServer;

/// Navigator that records every requested screen.
#[derive(Default)]
pub struct RecordingNavigator {
    screens: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn screens(&self) -> Vec<String> {
        self.screens.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, screen: &str, _params: Option<&serde_json::Value>) {
        self.screens.lock().unwrap().push(screen.to_string());
    }
}

pub struct Harness {
    pub client: AuthenticatedHttpClient,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn api(&self) -> EcoMapApi {
        EcoMapApi::new(self.client.clone())
    }

    pub async fn access(&self) -> Option<String> {
        self.store
            .access_token()
            .await
            .unwrap()
            .map(|t| t.as_str().to_string())
    }

    pub async fn refresh(&self) -> Option<String> {
        self.store
            .refresh_token()
            .await
            .unwrap()
            .map(|t| t.as_str().to_string())
    }
}

/// Build a client against a mock server with the given stored tokens.
pub fn harness(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Harness {
    harness_with_timeout(server, access, refresh, Duration::from_secs(5))
}

pub fn harness_with_timeout(
    server: &MockServer,
    access: Option<&str>,
    refresh: Option<&str>,
    timeout: Duration,
) -> Harness {
    let store = Arc::new(MemoryCredentialStore::with_tokens(access, refresh));
    build(server, store.clone(), store, timeout)
}

/// Like [`harness`], but the first access-token read waits for `delay`
/// before looking at the store.
pub fn harness_with_slow_first_read(
    server: &MockServer,
    access: Option<&str>,
    refresh: Option<&str>,
    delay: Duration,
) -> Harness {
    let store = Arc::new(MemoryCredentialStore::with_tokens(access, refresh));
    let slow = Arc::new(SlowFirstRead {
        inner: store.clone(),
        pending: AtomicBool::new(true),
        delay,
    });
    build(server, store, slow, Duration::from_secs(5))
}

fn build(
    server: &MockServer,
    store: Arc<MemoryCredentialStore>,
    backing: Arc<dyn CredentialStore>,
    timeout: Duration,
) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let config = ClientConfig::new(ApiUrl::new(server.uri()).unwrap()).with_timeout(timeout);
    let client =
        AuthenticatedHttpClient::new(config, backing, navigator.clone() as Arc<dyn Navigator>)
            .unwrap();

    Harness {
        client,
        store,
        navigator,
    }
}

/// Store whose first `access_token` call is delayed.
struct SlowFirstRead {
    inner: Arc<MemoryCredentialStore>,
    pending: AtomicBool,
    delay: Duration,
}

#[async_trait]
impl CredentialStore for SlowFirstRead {
    async fn access_token(&self) -> Result<Option<AccessToken>> {
        if self.pending.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.access_token().await
    }

    async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        self.inner.refresh_token().await
    }

    async fn save_tokens(&self, tokens: TokenPair) -> Result<()> {
        self.inner.save_tokens(tokens).await
    }

    async fn clear_tokens(&self) -> Result<()> {
        self.inner.clear_tokens().await
    }
}
