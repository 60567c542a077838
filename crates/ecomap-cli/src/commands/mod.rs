//! Subcommand implementations.

pub mod categories;
pub mod login;
pub mod logout;
pub mod points;
pub mod register;
pub mod verify;
pub mod whoami;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::session::CliSession;

pub async fn handle(cli: Cli) -> Result<()> {
    let session = CliSession::connect(&cli.connection)?;

    match cli.command {
        Commands::Login(args) => login::run(args, &session).await,
        Commands::Register(args) => register::run(args, &session).await,
        Commands::Logout(args) => logout::run(args, &session).await,
        Commands::Whoami(args) => whoami::run(args, &session).await,
        Commands::Verify(args) => verify::run(args, &session).await,
        Commands::Categories(cmd) => categories::handle(cmd, &session).await,
        Commands::Points(cmd) => points::handle(cmd, &session).await,
    }
}
