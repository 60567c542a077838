//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, session: &CliSession) -> Result<()> {
    session.require_credentials().await?;

    let me = session.api.me().await.context("Failed to fetch profile")?;

    if args.json {
        return output::json(&me);
    }

    let id = me.id.to_string();
    let mut rows = vec![("ID", id.as_str()), ("Email", me.email.as_str())];
    if let Some(name) = &me.name {
        rows.push(("Name", name.as_str()));
    }
    rows.push(("Staff", if me.is_staff { "yes" } else { "no" }));
    output::fields(&rows);

    Ok(())
}
