//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, session: &CliSession) -> Result<()> {
    if !session.has_credentials().await? {
        output::success("Not logged in");
        return Ok(());
    }

    // local credentials are gone either way
    if let Err(e) = session.api.logout().await {
        output::warn(&format!("Server did not confirm logout: {e}"));
    }

    output::success("Logged out");
    Ok(())
}
