//! Runtime handle: configuration, authentication, lifecycle control, status.

use crate::{
    Journal, LoopPolicy, Platform, RuntimeEvent, RuntimePhase, RuntimeStatus, StopReason,
};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use warden_core::{Credentials, JournalEntry, ReactionPolicy, RuntimeConfig, Session};
use warden_error::{BuilderError, RuntimeError, RuntimeErrorKind, RuntimeResult};

/// State shared between the caller and the worker.
///
/// Everything `status()` reports lives behind one lock so a snapshot never
/// mixes fields from before and after an update.
#[derive(Debug, Default)]
pub(crate) struct SharedState {
    pub(crate) phase: RuntimePhase,
    pub(crate) session: Option<Session>,
    pub(crate) current_community: Option<String>,
    pub(crate) protected_count: usize,
    pub(crate) journal: Journal,
    pub(crate) last_error: Option<String>,
}

pub(crate) struct Inner {
    pub(crate) platform: Arc<dyn Platform>,
    pub(crate) policy: LoopPolicy,
    pub(crate) credentials: RwLock<Credentials>,
    pub(crate) config: RwLock<RuntimeConfig>,
    pub(crate) state: RwLock<SharedState>,
    pub(crate) wake: Notify,
    pub(crate) events: broadcast::Sender<RuntimeEvent>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// Bot runtime for one credential identity.
///
/// Cloning is cheap and every clone controls the same runtime. At most one
/// worker task runs per runtime.
#[derive(Clone)]
pub struct Runtime {
    pub(crate) inner: Arc<Inner>,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("platform", &self.inner.platform.platform_name())
            .field("status", &self.status())
            .finish()
    }
}

impl Runtime {
    /// Create a new runtime with builder pattern.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::default()
    }

    /// Replace the credentials used by the next `authenticate()`.
    ///
    /// The current session, if any, is kept until the next authentication.
    pub fn configure(&self, credentials: Credentials) {
        debug!(identity = %credentials.identity(), "Credentials configured");
        *self.inner.credentials.write() = credentials;
    }

    /// Identity of the configured credentials.
    pub fn identity(&self) -> String {
        self.inner.credentials.read().identity().clone()
    }

    /// Copy of the live configuration.
    pub fn config(&self) -> RuntimeConfig {
        self.inner.config.read().clone()
    }

    /// Replace the live configuration; the worker picks it up next cycle.
    pub fn set_config(&self, config: RuntimeConfig) {
        *self.inner.config.write() = config;
    }

    /// Edit the live configuration in place.
    pub fn update_config(&self, f: impl FnOnce(&mut RuntimeConfig)) {
        f(&mut self.inner.config.write());
    }

    /// Set the community to watch (empty to pause on "waiting for target").
    pub fn set_target(&self, community: impl Into<String>) {
        let community = community.into();
        info!(community = %community, "Target community set");
        self.update_config(|config| config.target_community = community);
    }

    /// Replace the protection list.
    pub fn set_protected(&self, protected: impl IntoIterator<Item = String>) {
        let protected: BTreeSet<String> = protected.into_iter().collect();
        self.update_config(|config| config.protected = protected);
    }

    /// Replace the reaction policy.
    pub fn set_reactions(&self, reactions: ReactionPolicy) {
        self.update_config(|config| config.reactions = reactions);
    }

    /// Loop policy this runtime was built with.
    pub fn policy(&self) -> &LoopPolicy {
        &self.inner.policy
    }

    /// Subscribe to runtime observations.
    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeEvent> {
        self.inner.events.subscribe()
    }

    /// Authenticate with the configured credentials.
    ///
    /// Incomplete credentials fail without contacting the platform. Any
    /// failure clears the previous session. Returns whether a session is now
    /// held.
    #[instrument(skip(self), fields(identity = %self.identity()))]
    pub async fn authenticate(&self) -> bool {
        self.login().await.is_ok()
    }

    async fn login(&self) -> RuntimeResult<()> {
        let credentials = self.inner.credentials.read().clone();
        let identity = credentials.identity().clone();

        match self.exchange(&credentials).await {
            Ok(session) => {
                {
                    let mut state = self.inner.state.write();
                    state.session = Some(session);
                    state.last_error = None;
                }
                info!(platform = self.inner.platform.platform_name(), "Authenticated");
                self.emit(RuntimeEvent::Authenticated { identity });
                Ok(())
            }
            Err(e) => {
                match &e.kind {
                    RuntimeErrorKind::Credentials(c) => {
                        error!(missing = ?c.missing, "Missing required credentials")
                    }
                    kind => error!(error = %kind, "Authentication failed"),
                }
                self.drop_session(&identity, e.kind.to_string());
                Err(e)
            }
        }
    }

    async fn exchange(&self, credentials: &Credentials) -> RuntimeResult<Session> {
        credentials.validate()?;
        self.inner
            .platform
            .authenticate(credentials)
            .await
            .map_err(|e| RuntimeError::new(RuntimeErrorKind::AuthenticationFailed(e)))
    }

    /// Whether a session is held.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().session.is_some()
    }

    /// Start the worker.
    ///
    /// Authenticates first when no session is held. Returns `false` without
    /// changing state if a worker is already active or authentication fails.
    #[instrument(skip(self), fields(identity = %self.identity()))]
    pub async fn run(&self) -> bool {
        let community = match self.start().await {
            Ok(community) => community,
            Err(e) => {
                warn!(error = %e.kind, "Runtime not started");
                return false;
            }
        };

        info!(community = ?community, "Runtime started");
        self.emit(RuntimeEvent::Started {
            identity: self.identity(),
            community,
        });

        let handle = tokio::spawn(self.clone().work());
        *self.inner.worker.lock() = Some(handle);
        true
    }

    /// Move Idle to Running, returning the community the worker will watch.
    async fn start(&self) -> RuntimeResult<Option<String>> {
        if self.phase() != RuntimePhase::Idle {
            return Err(RuntimeError::new(RuntimeErrorKind::AlreadyActive));
        }

        if !self.is_authenticated() {
            info!("No session, authenticating before start");
            self.login().await?;
        }

        let config = self.config();
        let mut state = self.inner.state.write();
        if state.phase != RuntimePhase::Idle {
            return Err(RuntimeError::new(RuntimeErrorKind::AlreadyActive));
        }
        if state.session.is_none() {
            return Err(RuntimeError::new(RuntimeErrorKind::SessionLost));
        }
        state.phase = RuntimePhase::Running;
        state.current_community = config
            .has_target()
            .then(|| config.target_community.clone());
        state.protected_count = config.protected.len();
        Ok(state.current_community.clone())
    }

    /// Ask the worker to stop at its next check point.
    ///
    /// Idempotent and safe in any phase. Returns immediately; poll
    /// [`Runtime::status`] or await [`Runtime::join`] to observe the exit.
    #[instrument(skip(self), fields(identity = %self.identity()))]
    pub fn stop(&self) {
        let requested = {
            let mut state = self.inner.state.write();
            if state.phase == RuntimePhase::Running {
                state.phase = RuntimePhase::Stopping;
                true
            } else {
                false
            }
        };

        if requested {
            info!("Stopping runtime");
            self.emit(RuntimeEvent::StopRequested);
        } else {
            debug!("Stop requested while not running");
        }
        self.inner.wake.notify_waiters();
    }

    /// Wait for the current worker, if any, to exit.
    pub async fn join(&self) {
        let handle = self.inner.worker.lock().take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            error!(error = %e, "Worker task ended abnormally");
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RuntimePhase {
        self.inner.state.read().phase
    }

    /// Whether the worker is polling and has not been asked to stop.
    pub fn is_running(&self) -> bool {
        self.phase() == RuntimePhase::Running
    }

    /// Consistent status snapshot.
    pub fn status(&self) -> RuntimeStatus {
        let identity = self.identity();
        let state = self.inner.state.read();
        RuntimeStatus {
            identity,
            phase: state.phase,
            running: state.phase == RuntimePhase::Running,
            authenticated: state.session.is_some(),
            current_community: state.current_community.clone(),
            protected_count: state.protected_count,
            journal_count: state.journal.total(),
            outcomes: state.journal.counts(),
            last_error: state.last_error.clone(),
        }
    }

    /// Retained journal entries, oldest first.
    pub fn journal(&self) -> Vec<JournalEntry> {
        self.inner.state.read().journal.entries().cloned().collect()
    }

    /// The `n` most recent journal entries, oldest first.
    pub fn recent_activity(&self, n: usize) -> Vec<JournalEntry> {
        self.inner.state.read().journal.recent(n)
    }

    /// Most recent authentication or cycle failure.
    pub fn last_error(&self) -> Option<String> {
        self.inner.state.read().last_error.clone()
    }

    pub(crate) fn emit(&self, event: RuntimeEvent) {
        // No receivers is fine.
        let _ = self.inner.events.send(event);
    }

    pub(crate) fn session(&self) -> Option<Session> {
        self.inner.state.read().session.clone()
    }

    pub(crate) fn record_error(&self, message: String) {
        self.inner.state.write().last_error = Some(message);
    }

    /// Clear the session after a failed authentication.
    ///
    /// A running worker is moved to Stopping in the same critical section, so
    /// no snapshot ever shows running without a session.
    fn drop_session(&self, identity: &str, reason: String) {
        let was_running = {
            let mut state = self.inner.state.write();
            state.session = None;
            state.last_error = Some(reason.clone());
            if state.phase == RuntimePhase::Running {
                state.phase = RuntimePhase::Stopping;
                true
            } else {
                false
            }
        };

        if was_running {
            warn!("Session lost while running, worker will stop");
            self.inner.wake.notify_waiters();
        }
        self.emit(RuntimeEvent::AuthenticationFailed {
            identity: identity.to_string(),
            reason,
        });
    }

    /// Mark the worker as exited.
    pub(crate) fn finish(&self, reason: StopReason) {
        self.inner.state.write().phase = RuntimePhase::Idle;
        info!(%reason, "Runtime stopped");
        self.emit(RuntimeEvent::Stopped { reason });
    }
}

/// Builder for creating Runtime instances.
#[derive(Default)]
pub struct RuntimeBuilder {
    platform: Option<Arc<dyn Platform>>,
    credentials: Option<Credentials>,
    config: Option<RuntimeConfig>,
    policy: Option<LoopPolicy>,
    journal_capacity: Option<usize>,
    event_capacity: Option<usize>,
}

impl RuntimeBuilder {
    /// Set platform implementation.
    pub fn platform(mut self, platform: Arc<dyn Platform>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the initial live configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the loop policy.
    pub fn policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set how many journal entries are retained.
    pub fn journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = Some(capacity);
        self
    }

    /// Set the observation channel capacity.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    /// Build the runtime.
    ///
    /// # Errors
    ///
    /// Returns error if no platform was set or the loop policy is invalid.
    pub fn build(self) -> Result<Runtime, BuilderError> {
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

        let state = SharedState {
            journal: Journal::new(self.journal_capacity.unwrap_or(Journal::DEFAULT_CAPACITY)),
            ..SharedState::default()
        };

        Ok(Runtime {
            inner: Arc::new(Inner {
                platform,
                policy,
                credentials: RwLock::new(self.credentials.unwrap_or_default()),
                config: RwLock::new(self.config.unwrap_or_default()),
                state: RwLock::new(state),
                wake: Notify::new(),
                events,
                worker: Mutex::new(None),
            }),
        })
    }
}
