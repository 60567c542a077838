//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{categories, login, logout, points, register, verify, whoami};

/// EcoMap command-line client.
#[derive(Parser, Debug)]
#[command(name = "ecomap")]
#[command(author, version = env!("ECOMAP_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the API lives and where the session is kept.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// API base URL
    #[arg(
        long,
        env = "ECOMAP_API_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "ECOMAP_TIMEOUT_SECS", global = true)]
    pub timeout: Option<u64>,

    /// Directory holding the stored credentials
    #[arg(long, env = "ECOMAP_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login(login::LoginArgs),

    /// Create an account and store the session
    Register(register::RegisterArgs),

    /// Revoke the session and forget stored credentials
    Logout(logout::LogoutArgs),

    /// Display the logged-in account
    Whoami(whoami::WhoamiArgs),

    /// Check that the stored session is still valid
    Verify(verify::VerifyArgs),

    /// Collection type operations
    Categories(categories::CategoriesCommand),

    /// Collection point operations
    Points(points::PointsCommand),
}
