//! Dashboard operations over a set of runtimes.

use crate::{BotSettings, ControlEvent, ControlResponse, DashboardStatus, SettingsStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use warden_core::{ReactionPolicy, RuntimeConfig};
use warden_error::{BuilderError, ControlError, ControlErrorKind};
use warden_runtime::{LoopPolicy, Platform, Runtime, RuntimePhase};

const AUTHENTICATION: &str = "Authentication";
const SET_TARGET: &str = "Set Target";
const START_BOT: &str = "Start Bot";
const STOP_BOT: &str = "Stop Bot";
const SET_PROTECTED: &str = "Set Protected";
const SET_REACTIONS: &str = "Set Reactions";

/// A registered runtime and the task relaying its events.
struct Registration {
    runtime: Runtime,
    relay: JoinHandle<()>,
}

/// Control surface over one runtime per identity.
///
/// Operations never panic or return `Err`; failures are reported in the
/// [`ControlResponse`].
pub struct ControlFacade {
    platform: Arc<dyn Platform>,
    policy: LoopPolicy,
    journal_capacity: Option<usize>,
    defaults: RuntimeConfig,
    store: Option<SettingsStore>,
    runtimes: RwLock<HashMap<String, Registration>>,
    events: broadcast::Sender<ControlEvent>,
}

impl std::fmt::Debug for ControlFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlFacade")
            .field("platform", &self.platform.platform_name())
            .field("policy", &self.policy)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ControlFacade {
    /// Create a new facade with builder pattern.
    pub fn builder() -> ControlFacadeBuilder {
        ControlFacadeBuilder::default()
    }

    /// Subscribe to push messages.
    pub fn subscribe(&self) -> broadcast::Receiver<ControlEvent> {
        self.events.subscribe()
    }

    /// Runtime registered for `identity`.
    pub async fn runtime(&self, identity: &str) -> Option<Runtime> {
        self.runtimes
            .read()
            .await
            .get(identity)
            .map(|r| r.runtime.clone())
    }

    /// Registered identities, sorted.
    pub async fn identities(&self) -> Vec<String> {
        let mut identities: Vec<String> = self.runtimes.read().await.keys().cloned().collect();
        identities.sort();
        identities
    }

    /// Validate the form, authenticate, and register the runtime.
    ///
    /// An identity that is already registered keeps its runtime (and journal)
    /// and is re-authenticated with the new credentials.
    #[instrument(skip(self, form), fields(identity = %form.identity()))]
    pub async fn authenticate(&self, form: BotSettings) -> ControlResponse {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Authentication form incomplete");
            return failure(AUTHENTICATION, ControlErrorKind::MissingFields(missing));
        }

        let identity = form.identity().to_string();
        let existing = self.runtime(&identity).await;
        let reused = existing.is_some();

        let runtime = match existing {
            Some(runtime) => {
                runtime.configure(form.credentials());
                runtime.set_target(form.community.trim());
                runtime
            }
            None => match self.build_runtime(&form) {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!(error = %e, "Failed to build runtime");
                    return failure(AUTHENTICATION, ControlErrorKind::StartFailed(e.to_string()));
                }
            },
        };

        if !runtime.authenticate().await {
            let reason = runtime.last_error().unwrap_or_default();
            error!(%reason, "Authentication failed");
            return failure(AUTHENTICATION, ControlErrorKind::AuthenticationFailed(identity));
        }

        if !reused {
            self.register(&identity, runtime).await;
        }

        self.persist(|settings| {
            settings.credentials = Some(form.credentials());
            settings.communities = vec![form.community.trim().to_string()];
        });

        self.push(ControlEvent::AuthSuccess {
            username: identity.clone(),
        });
        info!("Identity authenticated");
        ControlResponse::success(
            AUTHENTICATION,
            "Authentication successful",
            &format!("Authenticated as {}", identity),
        )
    }

    /// Point a registered runtime at `community`.
    #[instrument(skip(self))]
    pub async fn set_target(&self, identity: &str, community: &str) -> ControlResponse {
        let community = community.trim();
        if community.is_empty() {
            return failure(
                SET_TARGET,
                ControlErrorKind::MissingFields(vec!["community".to_string()]),
            );
        }
        let Some(runtime) = self.runtime(identity).await else {
            return failure(SET_TARGET, unknown(identity));
        };

        runtime.set_target(community);
        self.persist(|settings| settings.communities = vec![community.to_string()]);
        ControlResponse::success(
            SET_TARGET,
            "Target community set",
            &format!("Set target to {}", community),
        )
    }

    /// Start a registered runtime.
    #[instrument(skip(self))]
    pub async fn start(&self, identity: &str) -> ControlResponse {
        let Some(runtime) = self.runtime(identity).await else {
            return failure(START_BOT, unknown(identity));
        };

        if runtime.phase() != RuntimePhase::Idle {
            warn!("Bot already active");
            return failure(START_BOT, ControlErrorKind::AlreadyRunning);
        }

        if !runtime.run().await {
            let reason = runtime
                .last_error()
                .unwrap_or_else(|| "runtime refused to start".to_string());
            return failure(START_BOT, ControlErrorKind::StartFailed(reason));
        }

        self.push(ControlEvent::BotStarted {
            username: identity.to_string(),
        });
        ControlResponse::success(
            START_BOT,
            "Bot started successfully",
            &format!("Bot started for {}", identity),
        )
    }

    /// Ask a registered runtime to stop.
    #[instrument(skip(self))]
    pub async fn stop(&self, identity: &str) -> ControlResponse {
        let Some(runtime) = self.runtime(identity).await else {
            return failure(STOP_BOT, unknown(identity));
        };

        runtime.stop();
        self.push(ControlEvent::BotStopped {
            username: identity.to_string(),
        });
        ControlResponse::success(
            STOP_BOT,
            "Bot stopped successfully",
            &format!("Bot stopped for {}", identity),
        )
    }

    /// Dashboard counters for `identity`; all zero when unknown.
    pub async fn status(&self, identity: Option<&str>) -> DashboardStatus {
        let Some(identity) = identity else {
            return DashboardStatus::default();
        };
        let Some(runtime) = self.runtime(identity).await else {
            return DashboardStatus::default();
        };

        let status = runtime.status();
        let communities = match &status.current_community {
            Some(_) => 1,
            None if runtime.config().has_target() => 1,
            None => 0,
        };
        DashboardStatus {
            authenticated: status.authenticated,
            running: status.running,
            messages: status.journal_count,
            communities,
        }
    }

    /// The `status` push message for a subscriber that just attached.
    pub async fn greeting(&self, identity: &str) -> Option<ControlEvent> {
        let runtime = self.runtime(identity).await?;
        Some(ControlEvent::Status {
            active: runtime.is_running(),
            username: identity.to_string(),
        })
    }

    /// Replace the protection list of a registered runtime.
    #[instrument(skip(self, protected))]
    pub async fn set_protected(&self, identity: &str, protected: Vec<String>) -> ControlResponse {
        let Some(runtime) = self.runtime(identity).await else {
            return failure(SET_PROTECTED, unknown(identity));
        };

        let count = protected.len();
        runtime.set_protected(protected.iter().cloned());
        self.persist(|settings| settings.protected = protected);
        ControlResponse::success(
            SET_PROTECTED,
            "Protection list updated",
            &format!("{} protected identities", count),
        )
    }

    /// Replace the reaction policy of a registered runtime.
    #[instrument(skip(self, reactions))]
    pub async fn set_reactions(&self, identity: &str, reactions: ReactionPolicy) -> ControlResponse {
        let Some(runtime) = self.runtime(identity).await else {
            return failure(SET_REACTIONS, unknown(identity));
        };

        let details = format!(
            "upvote={} reply={}",
            reactions.upvote,
            reactions.replies()
        );
        runtime.set_reactions(reactions.clone());
        self.persist(|settings| settings.reactions = reactions);
        ControlResponse::success(SET_REACTIONS, "Reactions updated", &details)
    }

    /// Stop every runtime and wait for the workers to exit.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        let registrations: Vec<Registration> =
            self.runtimes.write().await.drain().map(|(_, r)| r).collect();
        info!(count = registrations.len(), "Shutting down runtimes");

        for registration in &registrations {
            registration.runtime.stop();
        }
        for registration in registrations {
            registration.runtime.join().await;
            registration.relay.abort();
        }
    }

    fn build_runtime(&self, form: &BotSettings) -> Result<Runtime, BuilderError> {
        let mut builder = Runtime::builder()
            .platform(self.platform.clone())
            .credentials(form.credentials())
            .config(form.apply_to(self.defaults.clone()))
            .policy(self.policy.clone());
        if let Some(capacity) = self.journal_capacity {
            builder = builder.journal_capacity(capacity);
        }
        builder.build()
    }

    async fn register(&self, identity: &str, runtime: Runtime) {
        let relay = spawn_relay(identity.to_string(), &runtime, self.events.clone());
        let previous = self.runtimes.write().await.insert(
            identity.to_string(),
            Registration { runtime, relay },
        );
        if let Some(previous) = previous {
            warn!(identity, "Replacing concurrently registered runtime");
            previous.runtime.stop();
            previous.relay.abort();
        }
    }

    fn push(&self, event: ControlEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn persist(&self, f: impl FnOnce(&mut crate::Settings)) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.update(f) {
            warn!(error = %e, "Failed to persist settings");
        }
    }
}

impl Drop for ControlFacade {
    fn drop(&mut self) {
        for registration in self.runtimes.get_mut().values() {
            registration.relay.abort();
        }
    }
}

/// Forward runtime observations that need operator attention.
fn spawn_relay(
    identity: String,
    runtime: &Runtime,
    events: broadcast::Sender<ControlEvent>,
) -> JoinHandle<()> {
    let mut rx = runtime.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    for pushed in ControlEvent::from_runtime(&identity, &event) {
                        let _ = events.send(pushed);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(%identity, skipped, "Relay lagged behind runtime events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

fn unknown(identity: &str) -> ControlErrorKind {
    ControlErrorKind::UnknownIdentity(identity.to_string())
}

#[track_caller]
fn failure(action: &str, kind: ControlErrorKind) -> ControlResponse {
    ControlResponse::failure(action, &ControlError::new(kind))
}

/// Builder for creating ControlFacade instances.
#[derive(Default)]
pub struct ControlFacadeBuilder {
    platform: Option<Arc<dyn Platform>>,
    policy: Option<LoopPolicy>,
    journal_capacity: Option<usize>,
    defaults: Option<RuntimeConfig>,
    store: Option<SettingsStore>,
    event_capacity: Option<usize>,
}

impl ControlFacadeBuilder {
    /// Set the platform shared by every runtime.
    pub fn platform(mut self, platform: Arc<dyn Platform>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set the loop policy for new runtimes.
    pub fn policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the journal capacity for new runtimes.
    pub fn journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = Some(capacity);
        self
    }

    /// Set the protection list and reactions new runtimes start with.
    pub fn defaults(mut self, defaults: RuntimeConfig) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Persist credentials and targets to `store`.
    pub fn store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the push channel capacity.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    /// Build the facade.
    ///
    /// # Errors
    ///
    /// Returns error if no platform was set, the policy is invalid, or the
    /// event capacity is zero.
    pub fn build(self) -> Result<ControlFacade, BuilderError> {
        let platform = self.platform.ok_or_else(|| BuilderError::missing("platform"))?;

        let policy = self.policy.unwrap_or_default();
        policy
            .validate()
            .map_err(|e| BuilderError::invalid("policy", e.message))?;

        let event_capacity = self.event_capacity.unwrap_or(256);
        if event_capacity == 0 {
            return Err(BuilderError::invalid("event_capacity", "must be at least 1"));
        }
        let (events, _) = broadcast::channel(event_capacity);

        Ok(ControlFacade {
            platform,
            policy,
            journal_capacity: self.journal_capacity,
            defaults: self.defaults.unwrap_or_default(),
            store: self.store,
            runtimes: RwLock::new(HashMap::new()),
            events,
        })
    }
}
