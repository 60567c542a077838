//! Collaborator traits the HTTP client is built on.

mod credential_store;
mod navigator;

pub use credential_store::{CredentialStore, MemoryCredentialStore};
pub use navigator::{LOGIN_SCREEN, Navigator};
