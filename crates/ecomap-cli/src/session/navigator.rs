//! Terminal stand-in for app navigation.

use ecomap_core::{LOGIN_SCREEN, Navigator};

use crate::output;

/// Reports navigation requests on stderr.
///
/// The shell has no screens, so being sent to login means the stored
/// session is gone and the user has to log in again.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, screen: &str, _params: Option<&serde_json::Value>) {
        if screen == LOGIN_SCREEN {
            output::session_expired();
        } else {
            tracing::debug!(screen, "ignoring navigation request");
        }
    }
}
