//! ecomap-core - Core types and traits for the EcoMap client.
//!
//! This crate holds everything that does not touch the network: the error
//! taxonomy, token and credential types, the validated API base URL, the
//! domain models returned by the backend, and the collaborator traits
//! ([`CredentialStore`], [`Navigator`]) the HTTP client is built on.

pub mod credentials;
pub mod error;
pub mod filter;
pub mod hours;
pub mod models;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{LoginCredentials, NewAccount};
pub use error::Error;
pub use filter::filter_points;
pub use hours::{DayHours, HoursSlot, OperatingHours, OpeningPeriod, TimeField, format_time};
pub use models::{
    CollectionPoint, CollectionType, NewCollectionType, PointStatus, StatusUpdate, UserProfile,
};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use traits::{CredentialStore, LOGIN_SCREEN, MemoryCredentialStore, Navigator};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
