//! Warden CLI binary.
//!
//! - `warden check` validates configuration and stored settings
//! - `warden dry-run` exercises the bot against fixture posts

use clap::Parser;
use warden::{ObservabilityConfig, WardenConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check, dry_run};

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = WardenConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log.level.clone()
    };
    let mut observability = ObservabilityConfig::default()
        .with_log_level(level)
        .with_json_logs(cli.json_logs || config.log.json);
    if let Some(path) = &config.log.file {
        observability = observability.with_log_file(path);
    }
    init_observability(&observability)?;

    match cli.command {
        Commands::Check => check(&config)?,
        Commands::DryRun(args) => dry_run(args, &config).await?,
    }

    Ok(())
}
