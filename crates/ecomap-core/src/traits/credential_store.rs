//! Persisted credential store trait.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::{AccessToken, RefreshToken, Result, TokenPair};

/// Persistent storage for the access/refresh token pair.
///
/// Individual reads and writes are expected to be atomic at the storage
/// layer. The HTTP client never holds a store lock across a network call.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored access token, if any.
    async fn access_token(&self) -> Result<Option<AccessToken>>;

    /// Returns the stored refresh token, if any.
    async fn refresh_token(&self) -> Result<Option<RefreshToken>>;

    /// Replace the stored tokens.
    async fn save_tokens(&self, tokens: TokenPair) -> Result<()>;

    /// Remove all stored tokens.
    async fn clear_tokens(&self) -> Result<()>;
}

#[derive(Debug, Default)]
struct StoredTokens {
    access: Option<AccessToken>,
    refresh: Option<RefreshToken>,
}

/// A process-local credential store.
///
/// Used by tests and by embedders that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: RwLock<StoredTokens>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given tokens, each optional.
    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            tokens: RwLock::new(StoredTokens {
                access: access.map(AccessToken::new),
                refresh: refresh.map(RefreshToken::new),
            }),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn access_token(&self) -> Result<Option<AccessToken>> {
        let tokens = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tokens.access.clone())
    }

    async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        let tokens = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        Ok(tokens.refresh.clone())
    }

    async fn save_tokens(&self, pair: TokenPair) -> Result<()> {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        tokens.access = Some(pair.access);
        tokens.refresh = Some(pair.refresh);
        Ok(())
    }

    async fn clear_tokens(&self) -> Result<()> {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        *tokens = StoredTokens::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_clear() {
        let store = MemoryCredentialStore::new();
        assert!(store.access_token().await.unwrap().is_none());

        store.save_tokens(TokenPair::new("A1", "R1")).await.unwrap();
        assert_eq!(store.access_token().await.unwrap().unwrap().as_str(), "A1");
        assert_eq!(store.refresh_token().await.unwrap().unwrap().as_str(), "R1");

        store.clear_tokens().await.unwrap();
        assert!(store.access_token().await.unwrap().is_none());
        assert!(store.refresh_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn partial_tokens() {
        let store = MemoryCredentialStore::with_tokens(Some("A1"), None);
        assert!(store.access_token().await.unwrap().is_some());
        assert!(store.refresh_token().await.unwrap().is_none());
    }
}
