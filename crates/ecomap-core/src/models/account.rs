//! Account types.

use serde::{Deserialize, Serialize};

/// The profile of the authenticated user (`GET /accounts/me/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,

    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Staff accounts may approve or reject collection points.
    #[serde(default)]
    pub is_staff: bool,

    /// Any other fields the backend returns.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
