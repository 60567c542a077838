//! Screen navigation capability.

/// Screen shown when the session can no longer be recovered.
pub const LOGIN_SCREEN: &str = "login";

/// Requests that the front-end move to a named screen.
///
/// Navigation is fire-and-forget: the client does not wait for or observe
/// the outcome. The client calls it at most once per terminal
/// authentication failure.
pub trait Navigator: Send + Sync {
    fn navigate(&self, screen: &str, params: Option<&serde_json::Value>);
}
