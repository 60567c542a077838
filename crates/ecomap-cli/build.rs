//! Stamps the binary with a version string as `ECOMAP_VERSION`.
//!
//! Packagers can pin it with `ECOMAP_BUILD_VERSION`; otherwise the nearest
//! git tag is used, falling back to the crate version outside a checkout.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=ECOMAP_BUILD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags/");

    let version = env::var("ECOMAP_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=ECOMAP_VERSION={version}");
}

/// `git describe` output without a leading `v`, marked when the tree is dirty.
fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=+dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())?;

    let raw = String::from_utf8(output.stdout).ok()?;
    let tag = raw.trim();
    (!tag.is_empty()).then(|| tag.trim_start_matches('v').to_string())
}
