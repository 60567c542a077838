//! Location of the persisted credentials.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Resolve the data directory: an explicit override, or the platform
/// data directory for `ecomap`.
pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let dirs =
        ProjectDirs::from("", "", "ecomap").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Path of the credential file inside the data directory.
pub fn credentials_path(explicit: Option<&Path>) -> Result<PathBuf> {
    Ok(data_dir(explicit)?.join(CREDENTIALS_FILE))
}
