//! Typed operations of the EcoMap API.

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use ecomap_core::{
    CollectionPoint, CollectionType, LoginCredentials, NewAccount, NewCollectionType, Result,
    StatusUpdate, TokenPair, UserProfile,
};

use crate::client::AuthenticatedHttpClient;
use crate::endpoints::{
    ACTIVE_POINTS, COLLECTION_TYPES, INACTIVE_POINTS, LOGIN, LOGOUT, LoginRequest, LogoutRequest,
    ME, REGISTER, RegisterRequest, update_point_status,
};
use crate::request::OutboundRequest;

/// Body of a login or registration response.
#[derive(Deserialize)]
struct AuthBody {
    access: String,
    refresh: String,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// What login and registration return once the tokens are stored.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    /// The account, when the backend includes it.
    pub user: Option<UserProfile>,
    /// Remaining response fields.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The account and collection-point API.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use ecomap_core::{ApiUrl, LoginCredentials, MemoryCredentialStore, Navigator};
/// use ecomap_http::{AuthenticatedHttpClient, ClientConfig, EcoMapApi};
///
/// struct Shell;
/// impl Navigator for Shell {
///     fn navigate(&self, screen: &str, _params: Option<&serde_json::Value>) {
///         eprintln!("go to {screen}");
///     }
/// }
///
/// # async fn example() -> Result<(), ecomap_core::Error> {
/// let config = ClientConfig::new(ApiUrl::new("https://api.ecomap.example")?);
/// let client = AuthenticatedHttpClient::new(
///     config,
///     Arc::new(MemoryCredentialStore::new()),
///     Arc::new(Shell),
/// )?;
/// let api = EcoMapApi::new(client);
///
/// api.login(&LoginCredentials::new("alice@example.org", "hunter2")).await?;
/// for point in api.collection_points(true).await? {
///     println!("{} at {},{}", point.id, point.latitude, point.longitude);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EcoMapApi {
    client: AuthenticatedHttpClient,
}

impl EcoMapApi {
    pub fn new(client: AuthenticatedHttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AuthenticatedHttpClient {
        &self.client
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Log in and store the issued tokens.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        info!("Logging in");
        let body: AuthBody = self
            .client
            .post_json(
                LOGIN,
                &LoginRequest {
                    email: credentials.email(),
                    password: credentials.password(),
                },
            )
            .await?;
        self.accept_tokens(body).await
    }

    /// Create an account and store the issued tokens.
    #[instrument(skip(self, account), fields(email = %account.email()))]
    pub async fn register(&self, account: &NewAccount) -> Result<AuthResponse> {
        info!("Registering account");
        let body: AuthBody = self
            .client
            .post_json(
                REGISTER,
                &RegisterRequest {
                    email: account.email(),
                    password: account.password(),
                    name: account.name(),
                },
            )
            .await?;
        self.accept_tokens(body).await
    }

    async fn accept_tokens(&self, body: AuthBody) -> Result<AuthResponse> {
        self.client
            .store_tokens(TokenPair::new(body.access, body.refresh))
            .await?;
        debug!("Tokens stored");
        Ok(AuthResponse {
            user: body.user,
            extra: body.extra,
        })
    }

    /// Revoke the refresh token server-side and forget local credentials.
    ///
    /// Local credentials are cleared even when the server call fails; the
    /// server error is still returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let refresh = self.client.refresh_token().await?;

        let result = match refresh {
            Some(refresh) => {
                let request = OutboundRequest::post(LOGOUT).json(&LogoutRequest {
                    refresh: refresh.as_str(),
                })?;
                self.client.send(request).await.map(|_| ())
            }
            None => {
                debug!("no refresh token stored, skipping server logout");
                Ok(())
            }
        };

        if let Err(ref e) = result {
            warn!(error = %e, "server logout failed");
        }
        self.client.clear_credentials().await;
        result
    }

    /// Check the stored session, refreshing it if needed.
    pub async fn verify_session(&self) -> bool {
        self.client.verify_session().await
    }

    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserProfile> {
        self.client.get_json(ME).await
    }

    // ========================================================================
    // Collection types
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn collection_types(&self) -> Result<Vec<CollectionType>> {
        self.client.get_json(COLLECTION_TYPES).await
    }

    #[instrument(skip(self))]
    pub async fn create_collection_type(&self, new: &NewCollectionType) -> Result<CollectionType> {
        self.client.post_json(COLLECTION_TYPES, new).await
    }

    // ========================================================================
    // Collection points
    // ========================================================================

    /// List approved (`active`) or pending/rejected collection points.
    #[instrument(skip(self))]
    pub async fn collection_points(&self, active: bool) -> Result<Vec<CollectionPoint>> {
        let path = if active { ACTIVE_POINTS } else { INACTIVE_POINTS };
        self.client.get_json(path).await
    }

    /// Approve or reject a submitted collection point.
    ///
    /// Returns the response body as sent by the backend.
    #[instrument(skip(self))]
    pub async fn update_point_status(&self, id: i64, approved: bool) -> Result<serde_json::Value> {
        let update = StatusUpdate::from_approval(approved);
        self.client
            .patch_json(&update_point_status(id), &update)
            .await
    }
}
