//! The poll-and-react loop.

use crate::{Runtime, RuntimeEvent, StopReason};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use warden_core::{
    JournalEntry, Outcome, Post, ReactionKind, RuntimeConfig, Session, SkipReason,
};
use warden_error::{FailureClass, RuntimeError, RuntimeErrorKind, RuntimeResult};

/// What a single cycle did.
#[derive(Debug, Default)]
struct CycleSummary {
    fetched: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    interrupted: bool,
}

impl CycleSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.succeeded += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

impl Runtime {
    /// Worker entry point. Runs until stopped and always leaves the runtime Idle.
    pub(crate) async fn work(self) {
        let reason = match AssertUnwindSafe(self.poll_loop()).catch_unwind().await {
            Ok(reason) => reason,
            Err(_) => {
                error!("Worker panicked");
                self.record_error("worker panicked".to_string());
                StopReason::Panicked
            }
        };
        self.finish(reason);
    }

    #[instrument(skip(self), fields(identity = %self.identity()))]
    async fn poll_loop(&self) -> StopReason {
        let policy = self.inner.policy.clone();

        loop {
            if !self.is_running() {
                break;
            }

            let config = self.config();
            self.adopt(&config);

            if !config.has_target() {
                warn!("No target community specified, waiting");
                self.emit(RuntimeEvent::WaitingForTarget);
                self.pause(policy.idle_interval()).await;
                continue;
            }

            match self.cycle(&config).await {
                Ok(summary) => {
                    info!(
                        community = %config.target_community,
                        fetched = summary.fetched,
                        succeeded = summary.succeeded,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        interrupted = summary.interrupted,
                        "Cycle completed"
                    );
                    self.emit(RuntimeEvent::CycleCompleted {
                        fetched: summary.fetched,
                        succeeded: summary.succeeded,
                        skipped: summary.skipped,
                        failed: summary.failed,
                        interrupted: summary.interrupted,
                    });
                    if !self.is_running() {
                        break;
                    }
                    self.pause(policy.cycle_interval()).await;
                }
                Err(e) if matches!(e.kind, RuntimeErrorKind::SessionLost) => {
                    error!("Session lost, worker cannot continue");
                    return StopReason::SessionLost;
                }
                Err(e) => {
                    let backoff = match e.class() {
                        FailureClass::Outage => policy.outage_backoff(),
                        FailureClass::Transient => policy.cycle_interval(),
                    };
                    error!(
                        community = %config.target_community,
                        error = %e.kind,
                        class = %e.class(),
                        backoff_secs = backoff.as_secs(),
                        "Cycle failed"
                    );
                    self.record_error(e.kind.to_string());
                    self.emit(RuntimeEvent::CycleFailed {
                        outage: e.class() == FailureClass::Outage,
                        message: e.kind.to_string(),
                        backoff_secs: backoff.as_secs(),
                    });

                    if e.class() == FailureClass::Transient && !self.is_running() {
                        break;
                    }
                    self.pause(backoff).await;
                }
            }
        }

        if self.session().is_none() {
            StopReason::SessionLost
        } else {
            StopReason::Requested
        }
    }

    /// Publish the community and protection list the worker is acting on.
    fn adopt(&self, config: &RuntimeConfig) {
        let mut state = self.inner.state.write();
        state.current_community = config
            .has_target()
            .then(|| config.target_community.clone());
        state.protected_count = config.protected.len();
    }

    /// Fetch one batch and resolve every post in it.
    async fn cycle(&self, config: &RuntimeConfig) -> RuntimeResult<CycleSummary> {
        let session = self
            .session()
            .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::SessionLost))?;
        let batch_size = *self.inner.policy.batch_size();

        let posts = self
            .inner
            .platform
            .fetch_recent(&session, &config.target_community, batch_size)
            .await?;
        debug!(count = posts.len(), "Fetched posts");

        let mut summary = CycleSummary {
            fetched: posts.len(),
            ..CycleSummary::default()
        };

        for post in posts.iter().take(batch_size) {
            if !self.is_running() {
                info!("Stop requested, abandoning rest of batch");
                summary.interrupted = true;
                break;
            }
            let entry = self.process_post(&session, config, post).await;
            summary.record(*entry.outcome());
            self.append(entry);
        }

        Ok(summary)
    }

    /// Resolve one post to exactly one journal entry.
    #[instrument(skip_all, fields(post_id = %post.id, author = ?post.author))]
    async fn process_post(
        &self,
        session: &Session,
        config: &RuntimeConfig,
        post: &Post,
    ) -> JournalEntry {
        let Some(author) = post
            .author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
        else {
            warn!("Skipping post with no author");
            return JournalEntry::skipped(post, SkipReason::NoAuthor);
        };

        if config.is_protected(author) {
            info!("Skipping protected author");
            return JournalEntry::skipped(post, SkipReason::Protected);
        }

        let policy = &config.reactions;
        let action = ReactionKind::from(policy);
        let platform = &self.inner.platform;
        let mut failures = Vec::new();

        if policy.upvote {
            match platform.upvote(session, post).await {
                Ok(()) => info!("Upvoted post"),
                Err(e) => {
                    error!(error = %e, "Upvote failed");
                    failures.push(format!("upvote: {}", e.kind));
                }
            }
        }

        if policy.replies() {
            match platform.reply(session, post, &policy.reply_text).await {
                Ok(()) => info!("Replied to post"),
                Err(e) => {
                    error!(error = %e, "Reply failed");
                    failures.push(format!("reply: {}", e.kind));
                }
            }
        }

        if failures.is_empty() {
            JournalEntry::success(post, action)
        } else {
            JournalEntry::failed(post, action, failures.join("; "))
        }
    }

    fn append(&self, entry: JournalEntry) {
        self.inner.state.write().journal.push(entry.clone());
        self.emit(RuntimeEvent::PostProcessed { entry });
    }

    /// Sleep for `duration`, returning early when `stop()` is called.
    async fn pause(&self, duration: Duration) {
        let notified = self.inner.wake.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent stop() is not missed.
        notified.as_mut().enable();

        if !self.is_running() {
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = notified => debug!("Woken early by stop"),
        }
    }
}
