//! CLI argument parsing via clap.
//!
//! The interactive surface itself has no flags; these only select config and
//! output behavior before the keystroke loop starts.

use clap::Parser;
use std::path::PathBuf;

/// Interactive command console for a headless server.
#[derive(Debug, Parser)]
#[command(name = "servcon", version)]
pub struct Args {
    /// Path to config file (default: ./servcon.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the persistent log file path.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Disable colour output (directives are then printed literally).
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn defaults_leave_everything_unset() {
        let args = Args::parse_from(["servcon"]);
        assert!(args.config.is_none());
        assert!(args.log_file.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn overrides_parse() {
        let args = Args::parse_from([
            "servcon",
            "-c",
            "ops.toml",
            "--log-file",
            "ops.log",
            "--no-color",
        ]);
        assert_eq!(args.config.as_deref(), Some("ops.toml"));
        assert_eq!(args.log_file.as_deref().and_then(|p| p.to_str()), Some("ops.log"));
        assert!(args.no_color);
    }
}
