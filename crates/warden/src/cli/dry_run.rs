//! `warden dry-run`.

use super::DryRunArgs;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, instrument, warn};
use warden::{
    InMemoryPlatform, LoopPolicyBuilder, Post, Runtime, RuntimeEvent, SettingsStore,
    WardenConfig, env_credentials,
};

/// Run one runtime against fixture posts for a fixed number of cycles and
/// print the journal as JSON.
#[instrument(skip(config))]
pub async fn dry_run(
    args: DryRunArgs,
    config: &WardenConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let fixture = std::fs::read_to_string(&args.posts)?;
    let communities: HashMap<String, Vec<Post>> = serde_json::from_str(&fixture)?;

    let platform = Arc::new(InMemoryPlatform::new());
    for (community, posts) in communities {
        info!(%community, count = posts.len(), "Seeding fixture posts");
        platform.set_posts(community, posts);
    }

    let settings = SettingsStore::new(&config.settings_path).load()?;
    let credentials = env_credentials()
        .or_else(|| settings.credentials.clone())
        .ok_or("no credentials in settings or environment")?;

    let mut runtime_config = settings.runtime_config();
    if let Some(community) = &args.community {
        runtime_config.target_community = community.clone();
    }
    if !runtime_config.has_target() {
        return Err("no target community; set one in settings or pass --community".into());
    }

    let policy = match args.interval {
        Some(secs) => LoopPolicyBuilder::default()
            .batch_size(*config.loop_policy.batch_size())
            .cycle_interval_secs(secs)
            .idle_interval_secs(secs)
            .outage_backoff_secs(secs)
            .build()?,
        None => config.loop_policy.clone(),
    };

    let runtime = Runtime::builder()
        .platform(platform.clone())
        .credentials(credentials)
        .config(runtime_config)
        .policy(policy)
        .journal_capacity(config.journal.capacity)
        .build()?;

    let mut events = runtime.subscribe();
    if !runtime.run().await {
        let reason = runtime.last_error().unwrap_or_default();
        return Err(format!("runtime failed to start: {}", reason).into());
    }

    let mut cycles = 0;
    while cycles < args.cycles {
        match events.recv().await {
            Ok(RuntimeEvent::CycleCompleted { .. }) | Ok(RuntimeEvent::CycleFailed { .. }) => {
                cycles += 1;
                info!(cycles, of = args.cycles, "Cycle finished");
            }
            Ok(RuntimeEvent::Stopped { reason }) => {
                warn!(%reason, "Runtime stopped early");
                break;
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Dropped runtime events"),
            Err(RecvError::Closed) => break,
        }
    }

    runtime.stop();
    runtime.join().await;

    let status = runtime.status();
    info!(
        processed = status.journal_count,
        succeeded = status.outcomes.success,
        skipped = status.outcomes.skipped,
        failed = status.outcomes.failed,
        fetches = platform.fetch_count(),
        "Dry run finished"
    );
    println!("{}", serde_json::to_string_pretty(&runtime.journal())?);
    Ok(())
}
