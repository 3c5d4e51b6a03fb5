//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Warden - polling bot that reacts to new community posts
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(about = "Polling bot that reacts to new community posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./warden.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration and stored settings, then print a summary
    Check,

    /// Run the bot against posts from a JSON fixture instead of a live platform
    DryRun(DryRunArgs),
}

/// Arguments for `dry-run`
#[derive(Args, Debug, Clone)]
pub struct DryRunArgs {
    /// JSON file mapping community names to lists of posts
    #[arg(long)]
    pub posts: PathBuf,

    /// Number of cycles to run before stopping
    #[arg(long, default_value = "1")]
    pub cycles: usize,

    /// Community to watch instead of the stored target
    #[arg(long)]
    pub community: Option<String>,

    /// Override every loop interval (seconds)
    #[arg(long)]
    pub interval: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dry_run() {
        let cli = Cli::parse_from([
            "warden",
            "--json-logs",
            "dry-run",
            "--posts",
            "fixture.json",
            "--cycles",
            "3",
        ]);
        assert!(cli.json_logs);
        match cli.command {
            Commands::DryRun(args) => {
                assert_eq!(args.posts, PathBuf::from("fixture.json"));
                assert_eq!(args.cycles, 3);
                assert!(args.interval.is_none());
            }
            Commands::Check => panic!("expected dry-run"),
        }
    }

    #[test]
    fn config_is_global() {
        let cli = Cli::parse_from(["warden", "check", "--config", "alt.toml", "-v"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(cli.verbose);
    }
}
