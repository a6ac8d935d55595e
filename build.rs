//! Embeds the short git revision as `GIT_HASH` for the startup log line.
//!
//! Source tarballs have no `.git`; packagers can set `SHELTER_FINDER_REVISION`.

use std::env;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    let revision = env::var("SHELTER_FINDER_REVISION")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", revision);
    println!("cargo:rerun-if-env-changed=SHELTER_FINDER_REVISION");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
