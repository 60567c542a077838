//! Authenticated HTTP client with one-shot token refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use ecomap_core::error::{ApiError, AuthError, Error, TransportError};
use ecomap_core::{
    AccessToken, CredentialStore, LOGIN_SCREEN, Navigator, RefreshToken, Result, TokenPair,
};

use crate::config::ClientConfig;
use crate::endpoints::{
    RefreshRequest, RefreshResponse, TOKEN_REFRESH, TOKEN_VERIFY, VerifyRequest, is_public_route,
};
use crate::refresh::{RefreshGate, superseded};
use crate::request::{ApiResponse, OutboundRequest};

/// Whether the client still holds a usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    /// Credentials were cleared after an unrecoverable authentication
    /// failure. Stays so until new tokens are stored.
    Invalidated,
}

/// HTTP client that authenticates every non-public request.
///
/// - Requests to [public routes](crate::PUBLIC_ROUTES) are sent as-is.
/// - Other requests get `Authorization: Bearer <access token>` from the
///   credential store, or no header when none is stored.
/// - A 401 (or a blacklisted-token error) triggers one token refresh and
///   one resend of the same request.
/// - If the refresh fails, stored credentials are cleared, the navigator is
///   sent to the login screen, and the original error is returned.
///
/// Cloning is cheap; clones share the session.
#[derive(Clone)]
pub struct AuthenticatedHttpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    refresh_gate: RefreshGate,
    invalidated: AtomicBool,
}

impl AuthenticatedHttpClient {
    /// Create a client over the given collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                store,
                navigator,
                refresh_gate: RefreshGate::new(),
                invalidated: AtomicBool::new(false),
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    pub fn session_state(&self) -> SessionState {
        if self.inner.invalidated.load(Ordering::Acquire) {
            SessionState::Invalidated
        } else {
            SessionState::Active
        }
    }

    /// Send a request, returning the response if its status is a success.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] when the request could not be completed.
    /// - [`Error::Api`] for non-success responses that were not recovered,
    ///   including the original rejection when the refresh failed.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send(&self, mut request: OutboundRequest) -> Result<ApiResponse> {
        self.decorate(&mut request).await;

        let response = self.dispatch(&request).await?;
        match response.into_result() {
            Ok(response) => Ok(response),
            Err(err) => self.recover(request, err).await,
        }
    }

    /// Send a request and decode the JSON response body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: OutboundRequest) -> Result<T> {
        self.send(request).await?.json()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(OutboundRequest::get(path)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(OutboundRequest::post(path).json(body)?).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(OutboundRequest::patch(path).json(body)?).await
    }

    /// Attach the stored access token unless the path is public.
    ///
    /// Never fails: a missing or unreadable token leaves the request
    /// unauthenticated and lets the server reject it.
    pub async fn decorate(&self, request: &mut OutboundRequest) {
        if is_public_route(request.path()) {
            trace!("public route, sending without credentials");
            return;
        }

        match self.inner.store.access_token().await {
            Ok(Some(token)) => request.set_bearer(&token),
            Ok(None) => debug!("no access token stored, sending unauthenticated"),
            Err(e) => warn!(error = %e, "failed to read access token, sending unauthenticated"),
        }
    }

    /// Refresh the access token once and resend, or end the session.
    async fn recover(&self, mut request: OutboundRequest, err: ApiError) -> Result<ApiResponse> {
        if !err.is_auth_rejected() || request.is_retried() {
            return Err(err.into());
        }

        request.mark_retried();
        debug!(status = err.status, "access token rejected, refreshing");

        let carried = request.bearer_token().map(str::to_owned);
        match self.refresh_access_token(carried.as_deref()).await {
            Ok(token) => {
                request.set_bearer(&token);
                let response = self.dispatch(&request).await?;
                response.into_result().map_err(Error::from)
            }
            Err(refresh_err) => {
                warn!(error = %refresh_err, "token refresh failed, ending session");
                self.invalidate_session().await;
                Err(err.into())
            }
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// The refresh token is kept as-is. `rejected` is the access token the
    /// server just refused; if the store already holds a different one,
    /// another caller refreshed in the meantime and that token is returned
    /// without calling the endpoint again.
    #[instrument(skip_all)]
    async fn refresh_access_token(&self, rejected: Option<&str>) -> Result<AccessToken> {
        let _permit = self.inner.refresh_gate.acquire().await;

        match self.inner.store.access_token().await {
            Ok(Some(stored)) if superseded(rejected, Some(&stored)) => {
                debug!("reusing access token from concurrent refresh");
                return Ok(stored);
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to read access token before refresh"),
        }

        let refresh = self
            .inner
            .store
            .refresh_token()
            .await?
            .ok_or(AuthError::NoRefreshToken)?;

        info!("Refreshing access token");

        let request = OutboundRequest::post(TOKEN_REFRESH).json(&RefreshRequest {
            refresh: refresh.as_str(),
        })?;
        let response = self
            .dispatch(&request)
            .await?
            .into_result()
            .map_err(|e| AuthError::RefreshFailed {
                status: Some(e.status),
                detail: e.detail,
            })?;
        let body: RefreshResponse = response.json()?;

        let access = AccessToken::new(body.access);
        self.inner
            .store
            .save_tokens(TokenPair {
                access: access.clone(),
                refresh,
            })
            .await?;

        debug!("Access token refreshed");
        Ok(access)
    }

    /// Check the stored access token against the verify endpoint.
    ///
    /// Returns false without a network call when no token is stored. A
    /// rejected token is refreshed and the result of that refresh decides
    /// the answer; a failed refresh clears the stored credentials.
    #[instrument(skip(self))]
    pub async fn verify_session(&self) -> bool {
        let access = match self.inner.store.access_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no access token stored");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "failed to read access token");
                return false;
            }
        };

        let request = match OutboundRequest::post(TOKEN_VERIFY).json(&VerifyRequest {
            token: access.as_str(),
        }) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "failed to encode verify request");
                return false;
            }
        };

        // the verify route handles its own 401, outside the generic recovery
        let outcome = self
            .dispatch(&request)
            .await
            .and_then(|response| response.into_result().map_err(Error::from));

        match outcome {
            Ok(_) => true,
            Err(err) if err.status() == Some(401) => {
                match self.refresh_access_token(Some(access.as_str())).await {
                    Ok(_) => true,
                    Err(refresh_err) => {
                        warn!(error = %refresh_err, "token refresh failed during verification");
                        self.clear_credentials().await;
                        false
                    }
                }
            }
            Err(err) => {
                debug!(error = %err, "session verification failed");
                false
            }
        }
    }

    /// Persist tokens issued by login or registration and reactivate the session.
    pub async fn store_tokens(&self, tokens: TokenPair) -> Result<()> {
        self.inner.store.save_tokens(tokens).await?;
        self.inner.invalidated.store(false, Ordering::Release);
        Ok(())
    }

    /// Returns the stored refresh token, if any.
    pub async fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        self.inner.store.refresh_token().await
    }

    /// Remove stored credentials without navigating.
    pub async fn clear_credentials(&self) {
        if let Err(e) = self.inner.store.clear_tokens().await {
            warn!(error = %e, "failed to clear stored credentials");
        }
    }

    /// Clear credentials and send the front-end to the login screen.
    ///
    /// Navigation happens only on the first invalidation of a session.
    async fn invalidate_session(&self) {
        self.clear_credentials().await;

        if !self.inner.invalidated.swap(true, Ordering::AcqRel) {
            info!("Session ended, redirecting to login");
            self.inner.navigator.navigate(LOGIN_SCREEN, None);
        }
    }

    /// Send a request exactly as described, without decoration or recovery.
    async fn dispatch(&self, request: &OutboundRequest) -> Result<ApiResponse> {
        let url = self.inner.config.base_url.endpoint(request.path());
        debug!(method = %request.method(), %url, "HTTP request");

        let mut builder = self.inner.http.request(request.method().clone(), &url);
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        trace!(status, "HTTP response");

        Ok(ApiResponse::new(status, body.to_vec()))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        let err = if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.inner.config.timeout.as_millis())
                    .unwrap_or(u64::MAX),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        };
        Error::Transport(err)
    }
}

impl std::fmt::Debug for AuthenticatedHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedHttpClient")
            .field("base_url", &self.inner.config.base_url)
            .field("session", &self.session_state())
            .finish()
    }
}
