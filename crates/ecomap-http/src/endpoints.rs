//! API endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const REGISTER: &str = "/accounts/register/";

pub const LOGIN: &str = "/accounts/login/";

pub const TOKEN_VERIFY: &str = "/accounts/token/verify/";

pub const TOKEN_REFRESH: &str = "/accounts/token/refresh/";

pub const LOGOUT: &str = "/accounts/logout/";

pub const ME: &str = "/accounts/me/";

pub const COLLECTION_TYPES: &str = "/eco-points/collection-type/";

pub const ACTIVE_POINTS: &str = "/eco-points/collection-points/active/";

pub const INACTIVE_POINTS: &str = "/eco-points/collection-points/inactive/";

/// `/eco-points/collection-points/{id}/update-status/`
pub fn update_point_status(id: i64) -> String {
    format!("/eco-points/collection-points/{id}/update-status/")
}

/// Endpoints reachable without an access token.
pub const PUBLIC_ROUTES: [&str; 4] = [REGISTER, LOGIN, TOKEN_VERIFY, TOKEN_REFRESH];

/// Whether a request path targets a public endpoint.
///
/// Matching is by suffix so that paths carrying a base prefix still match.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|route| path.ends_with(route))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
}

#[derive(Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct LogoutRequest<'a> {
    pub refresh: &'a str,
}

/// Error body format of the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
