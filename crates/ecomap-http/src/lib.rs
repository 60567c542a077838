//! ecomap-http - Authenticated HTTP client for the EcoMap API.
//!
//! [`AuthenticatedHttpClient`] attaches bearer tokens from a
//! [`CredentialStore`](ecomap_core::CredentialStore), refreshes them once per
//! request when the API rejects them, and ends the session through a
//! [`Navigator`](ecomap_core::Navigator) when the refresh fails.
//! [`EcoMapApi`] layers the typed account and collection-point operations
//! on top.

mod api;
mod client;
mod config;
mod endpoints;
mod refresh;
mod request;

pub use api::{AuthResponse, EcoMapApi};
pub use client::{AuthenticatedHttpClient, SessionState};
pub use config::ClientConfig;
pub use endpoints::{PUBLIC_ROUTES, is_public_route};
pub use request::{ApiResponse, OutboundRequest};
