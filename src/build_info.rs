//! Compile-time build metadata surfaced in the startup banner.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("SERVCON_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("SERVCON_BUILD_TIMESTAMP");

/// One-line startup metadata shown when the console comes up.
pub fn startup_metadata_line() -> String {
    format!("servcon v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
