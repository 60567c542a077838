//! Helpers for running the built binary against a mock API.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Output;

use ecomap_core::{CredentialStore, TokenPair};
use ecomap_file::FileCredentialStore;
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::MockServer;

/// A CLI invocation context with its own data directory.
pub struct TestCli {
    data_dir: TempDir,
    api_url: String,
}

impl TestCli {
    pub fn new(server: &MockServer) -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
            api_url: server.uri(),
        }
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.path().join("credentials.json")
    }

    pub fn store(&self) -> FileCredentialStore {
        FileCredentialStore::new(self.credentials_path())
    }

    /// Write tokens as if a previous `login` had succeeded.
    pub async fn seed(&self, access: &str, refresh: &str) {
        self.store()
            .save_tokens(TokenPair::new(access, refresh))
            .await
            .unwrap();
    }

    pub async fn stored_access(&self) -> Option<String> {
        self.store()
            .access_token()
            .await
            .unwrap()
            .map(|t| t.as_str().to_string())
    }

    /// Run the binary with arguments.
    pub async fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ecomap"))
            .args(args)
            .env("ECOMAP_API_URL", &self.api_url)
            .env("ECOMAP_DATA_DIR", self.data_dir.path())
            .env("ECOMAP_TIMEOUT_SECS", "5")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("ECOMAP_PASSWORD")
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Run the binary and expect success, returning stdout.
    pub async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the binary and expect failure, returning stderr.
    pub async fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
