//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ecomap_core::LoginCredentials;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "ECOMAP_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, session: &CliSession) -> Result<()> {
    let credentials = LoginCredentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let response = session
        .api
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    let id = response.user.as_ref().map(|user| user.id.to_string());
    let email = response
        .user
        .as_ref()
        .map_or(args.email.as_str(), |user| user.email.as_str());
    let api = session.api.client().config().base_url.to_string();

    let mut rows = Vec::new();
    if let Some(id) = &id {
        rows.push(("ID", id.as_str()));
    }
    rows.push(("Email", email));
    rows.push(("API", api.as_str()));
    output::fields(&rows);

    Ok(())
}
