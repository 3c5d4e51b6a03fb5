//! `warden check`.

use tracing::{info, instrument};
use warden::{SettingsStore, WardenConfig, env_credentials};

/// Load stored settings and print the effective configuration.
#[instrument(skip(config))]
pub fn check(config: &WardenConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = SettingsStore::new(&config.settings_path);
    let settings = store.load()?;
    info!(path = %store.path().display(), "Settings loaded");

    let policy = &config.loop_policy;
    println!("Configuration OK");
    println!("  batch size:       {}", policy.batch_size());
    println!("  cycle interval:   {}s", policy.cycle_interval_secs());
    println!("  idle interval:    {}s", policy.idle_interval_secs());
    println!("  outage backoff:   {}s", policy.outage_backoff_secs());
    println!("  journal capacity: {}", config.journal.capacity);

    println!("Settings ({})", store.path().display());
    println!("  target:     {}", settings.target().unwrap_or("(none)"));
    println!("  protected:  {}", settings.protected.len());
    println!(
        "  reactions:  upvote={} reply={}",
        settings.reactions.upvote,
        settings.reactions.replies()
    );

    match env_credentials().or(settings.credentials) {
        None => println!("  credentials: none"),
        Some(credentials) => match credentials.validate() {
            Ok(()) => println!("  credentials: complete for '{}'", credentials.identity()),
            Err(e) => println!("  credentials: missing {}", e.missing.join(", ")),
        },
    }

    Ok(())
}
