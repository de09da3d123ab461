//! Deferred deletions.
//!
//! Every scheduled action runs as its own detached tokio task: sleep for the
//! delay, then fire once. Nothing is persisted, so a restart drops whatever
//! was still pending.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reelgate_core::{duration_millis, ChatId, Clock, MessageId};

use crate::transport::{DeleteOutcome, MessagingTransport};

/// How long delivered media stays in the chat.
pub const DEFAULT_CONTENT_TTL: Duration = Duration::from_secs(30 * 60);

/// How long the removal notice stays before it is deleted too.
pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_secs(10);

/// Text posted where expired media used to be.
pub const DEFAULT_REMOVAL_NOTICE: &str =
    "⚠️ The movie file has been automatically deleted for security reasons.";

/// Scheduler settings.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub notice_delay: Duration,
    pub removal_notice: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            notice_delay: DEFAULT_NOTICE_DELAY,
            removal_notice: DEFAULT_REMOVAL_NOTICE.to_string(),
        }
    }
}

/// What a deferred action does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredActionKind {
    /// Delete delivered media, then post and schedule the removal notice.
    DeleteContent,
    /// Delete a removal notice. Ends the chain.
    DeleteNotification,
}

impl DeferredActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeferredActionKind::DeleteContent => "delete_content",
            DeferredActionKind::DeleteNotification => "delete_notification",
        }
    }
}

/// A one-shot action bound to a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredAction {
    pub kind: DeferredActionKind,
    pub chat: ChatId,
    pub message: MessageId,
    /// Wall-clock instant (Unix ms) the action is due.
    pub fire_at: i64,
}

/// What happened when an action fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Deleted,
    /// The target was already removed; nothing else was done.
    AlreadyGone,
    /// The transport failed. The action is not retried.
    Failed,
}

struct Inner {
    transport: Arc<dyn MessagingTransport>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    pending: AtomicUsize,
}

/// Schedules and fires deferred deletions.
///
/// Cheap to clone; clones share the pending counter.
#[derive(Clone)]
pub struct DeferredActionScheduler {
    inner: Arc<Inner>,
}

impl DeferredActionScheduler {
    pub fn new(
        transport: Arc<dyn MessagingTransport>,
        clock: Arc<dyn Clock>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                clock,
                config,
                pending: AtomicUsize::new(0),
            }),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.inner.config
    }

    /// Number of actions scheduled but not yet fired.
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Schedule `kind` against `message` to fire after `delay`.
    ///
    /// Returns immediately. Must be called from within a tokio runtime.
    pub fn schedule(
        &self,
        kind: DeferredActionKind,
        chat: ChatId,
        message: MessageId,
        delay: Duration,
    ) -> DeferredAction {
        let fire_at = self
            .inner
            .clock
            .now_millis()
            .saturating_add(duration_millis(delay));
        let action = DeferredAction {
            kind,
            chat,
            message,
            fire_at,
        };

        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            action = kind.as_str(),
            chat = %chat,
            message = %message,
            fire_at,
            "scheduled deferred action"
        );

        let scheduler = self.clone();
        let task = action.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            scheduler.fire(&task).await;
            scheduler.inner.pending.fetch_sub(1, Ordering::SeqCst);
        });

        action
    }

    /// Run an action now.
    ///
    /// Failures are logged and reported in the outcome, never propagated.
    pub async fn fire(&self, action: &DeferredAction) -> FireOutcome {
        match self
            .inner
            .transport
            .delete(action.chat, action.message)
            .await
        {
            Ok(DeleteOutcome::Deleted) => {}
            Ok(DeleteOutcome::NotFound) => {
                tracing::info!(
                    action = action.kind.as_str(),
                    chat = %action.chat,
                    message = %action.message,
                    "target already gone"
                );
                return FireOutcome::AlreadyGone;
            }
            Err(e) => {
                tracing::warn!(
                    action = action.kind.as_str(),
                    chat = %action.chat,
                    message = %action.message,
                    error = %e,
                    "deferred delete failed"
                );
                return FireOutcome::Failed;
            }
        }

        tracing::info!(
            action = action.kind.as_str(),
            chat = %action.chat,
            message = %action.message,
            "deleted expired message"
        );

        if action.kind == DeferredActionKind::DeleteContent {
            self.post_removal_notice(action.chat).await;
        }
        FireOutcome::Deleted
    }

    async fn post_removal_notice(&self, chat: ChatId) {
        let config = &self.inner.config;
        match self
            .inner
            .transport
            .send_text(chat, &config.removal_notice)
            .await
        {
            Ok(notice) => {
                self.schedule(
                    DeferredActionKind::DeleteNotification,
                    chat,
                    notice,
                    config.notice_delay,
                );
            }
            Err(e) => {
                tracing::warn!(chat = %chat, error = %e, "failed to post removal notice");
            }
        }
    }
}
