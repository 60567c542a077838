//! List points command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ecomap_core::{CollectionPoint, CollectionType, filter_points};

use crate::output;
use crate::session::CliSession;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List pending and rejected points instead of approved ones
    #[arg(long)]
    pub inactive: bool,

    /// Only show points accepting this category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, session: &CliSession) -> Result<()> {
    let points = session
        .api
        .collection_points(!args.inactive)
        .await
        .context("Failed to list collection points")?;

    let types = session
        .api
        .collection_types()
        .await
        .context("Failed to list collection types")?;

    let shown = filter_points(&points, &types, &args.categories);

    if shown.is_empty() {
        output::nothing_found("collection points");
        return Ok(());
    }

    for point in shown {
        if args.json {
            output::json(point)?;
        } else {
            println!("{}", describe(point, &types));
        }
    }

    Ok(())
}

fn describe(point: &CollectionPoint, types: &[CollectionType]) -> String {
    let names: Vec<&str> = point
        .types
        .iter()
        .filter_map(|id| types.iter().find(|t| t.id == *id))
        .map(|t| t.name.as_str())
        .collect();

    let mut line = format!(
        "{:>4}  {:.5}, {:.5}",
        point.id, point.latitude, point.longitude
    );
    if let Some(name) = &point.name {
        line.push_str(&format!("  {name}"));
    }
    if !names.is_empty() {
        line.push_str(&format!("  [{}]", names.join(", ")));
    }
    if let Some(status) = point.status {
        line.push_str(&format!("  {}", status.as_str().dimmed()));
    }
    line
}
