//! Collection point commands.

mod hours;
mod list;
mod review;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct PointsCommand {
    #[command(subcommand)]
    pub command: PointsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PointsSubcommand {
    /// List collection points
    List(list::ListArgs),

    /// Approve a pending collection point (staff only)
    Approve(review::ReviewArgs),

    /// Reject a pending collection point (staff only)
    Reject(review::ReviewArgs),

    /// Check a weekly opening schedule before submitting a point
    Hours(hours::HoursArgs),
}

pub async fn handle(cmd: PointsCommand, session: &CliSession) -> Result<()> {
    match cmd.command {
        PointsSubcommand::List(args) => list::run(args, session).await,
        PointsSubcommand::Approve(args) => review::run(args, true, session).await,
        PointsSubcommand::Reject(args) => review::run(args, false, session).await,
        PointsSubcommand::Hours(args) => hours::run(args).await,
    }
}
