//! Injects build metadata (commit hash, build time) for the `--version` output.
//!
//! Dependency-free on purpose. Missing git/date tooling degrades to "unknown"
//! markers rather than failing the build.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=SERVCON_BUILD_GIT_HASH");
    println!("cargo:rerun-if-env-changed=SERVCON_BUILD_TIMESTAMP");

    let commit = std::env::var("SERVCON_BUILD_GIT_HASH")
        .ok()
        .or_else(|| capture("git", &["rev-parse", "--short=12", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let built = std::env::var("SERVCON_BUILD_TIMESTAMP")
        .ok()
        .or_else(|| capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=SERVCON_BUILD_GIT_HASH={commit}");
    println!("cargo:rustc-env=SERVCON_BUILD_TIMESTAMP={built}");
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
