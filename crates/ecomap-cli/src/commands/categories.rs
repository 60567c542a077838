//! Collection type commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use ecomap_core::NewCollectionType;

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    #[command(subcommand)]
    pub command: CategoriesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesSubcommand {
    /// List collection types
    List(ListArgs),

    /// Create a collection type
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Category name (e.g., Vidro)
    pub name: String,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
}

pub async fn handle(cmd: CategoriesCommand, session: &CliSession) -> Result<()> {
    match cmd.command {
        CategoriesSubcommand::List(args) => list(args, session).await,
        CategoriesSubcommand::Create(args) => create(args, session).await,
    }
}

async fn list(args: ListArgs, session: &CliSession) -> Result<()> {
    let types = session
        .api
        .collection_types()
        .await
        .context("Failed to list collection types")?;

    if types.is_empty() {
        output::nothing_found("collection types");
        return Ok(());
    }

    for t in &types {
        if args.json {
            output::json(t)?;
        } else {
            match &t.description {
                Some(description) => {
                    println!("{:>4}  {}  {}", t.id, t.name, description.dimmed())
                }
                None => println!("{:>4}  {}", t.id, t.name),
            }
        }
    }

    Ok(())
}

async fn create(args: CreateArgs, session: &CliSession) -> Result<()> {
    session.require_credentials().await?;

    let new = NewCollectionType {
        name: args.name,
        description: args.description,
    };

    let created = session
        .api
        .create_collection_type(&new)
        .await
        .context("Failed to create collection type")?;

    output::fields(&[("ID", &created.id.to_string()), ("Name", &created.name)]);
    output::success("Collection type created");

    Ok(())
}
