//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ecomap_core::NewAccount;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "ECOMAP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn run(args: RegisterArgs, session: &CliSession) -> Result<()> {
    let mut account = NewAccount::new(&args.email, &args.password);
    if let Some(name) = &args.name {
        account = account.with_name(name);
    }

    eprintln!("{}", "Creating account...".dimmed());

    session
        .api
        .register(&account)
        .await
        .context("Failed to create account")?;

    let mut rows = vec![("Email", args.email.as_str())];
    if let Some(name) = &args.name {
        rows.push(("Name", name.as_str()));
    }
    output::fields(&rows);
    output::success("Account created successfully");

    Ok(())
}
