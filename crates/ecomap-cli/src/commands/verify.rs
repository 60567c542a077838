//! Verify command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::output;
use crate::session::{CliSession, NO_SESSION};

#[derive(Args, Debug)]
pub struct VerifyArgs {}

pub async fn run(_args: VerifyArgs, session: &CliSession) -> Result<()> {
    session.require_credentials().await?;

    if !session.api.verify_session().await {
        bail!(NO_SESSION);
    }

    output::success("Session is valid");
    Ok(())
}
