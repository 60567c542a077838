//! Approve and reject commands.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Collection point id
    pub id: i64,
}

pub async fn run(args: ReviewArgs, approve: bool, session: &CliSession) -> Result<()> {
    session.require_credentials().await?;

    let action = if approve { "approve" } else { "reject" };
    session
        .api
        .update_point_status(args.id, approve)
        .await
        .with_context(|| format!("Failed to {action} point {}", args.id))?;

    let done = if approve { "Approved" } else { "Rejected" };
    output::success(&format!("{done} point {}", args.id));

    Ok(())
}
