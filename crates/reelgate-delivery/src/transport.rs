//! Messaging transport abstraction.
//!
//! The transport carries media and notices to a chat and can remove them
//! again. Implementations wrap a bot API; the in-memory one below is used by
//! tests and local runs.

use async_trait::async_trait;

use reelgate_core::{ChatId, MediaKind, MessageId, OwnerId};

use crate::error::TransportError;

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Media to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMedia {
    /// URL or platform file id.
    pub locator: String,
    pub kind: MediaKind,
    pub caption: String,
    /// Ask the platform to block forwarding and saving.
    pub protect_content: bool,
    /// Thread the media under this message.
    pub reply_to: Option<MessageId>,
}

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The message no longer exists. Callers treat this as success.
    NotFound,
}

/// Transport trait for delivering and withdrawing messages.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    /// Send media, non-forwardable where the platform supports it.
    async fn send_protected(&self, chat: ChatId, media: &OutboundMedia) -> Result<MessageId>;

    /// Send a plain text message.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<MessageId>;

    /// Delete a message.
    async fn delete(&self, chat: ChatId, message: MessageId) -> Result<DeleteOutcome>;

    /// Stop `owner` from forwarding messages in `chat`.
    async fn restrict_forwarding(&self, chat: ChatId, owner: OwnerId) -> Result<()>;
}

/// A simple in-memory transport for testing.
///
/// Records every message and lets tests inject failures.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    /// What a recorded message carried.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SentBody {
        Media(OutboundMedia),
        Text(String),
    }

    /// A message the transport accepted.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentMessage {
        pub chat: ChatId,
        pub id: MessageId,
        pub body: SentBody,
    }

    #[derive(Default)]
    struct State {
        next_id: i64,
        live: BTreeMap<(ChatId, MessageId), SentMessage>,
        history: Vec<SentMessage>,
        deleted: Vec<(ChatId, MessageId)>,
        restricted: Vec<(ChatId, OwnerId)>,
    }

    /// In-memory transport implementation.
    #[derive(Default)]
    pub struct MemoryMessenger {
        state: Mutex<State>,
        fail_sends: AtomicBool,
        fail_restrict: AtomicBool,
        fail_deletes: AtomicBool,
    }

    impl MemoryMessenger {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make media sends fail.
        pub fn fail_sends(&self, fail: bool) {
            self.fail_sends.store(fail, Ordering::SeqCst);
        }

        /// Make forwarding restriction fail.
        pub fn fail_restrict(&self, fail: bool) {
            self.fail_restrict.store(fail, Ordering::SeqCst);
        }

        /// Make deletes fail with a transport error.
        pub fn fail_deletes(&self, fail: bool) {
            self.fail_deletes.store(fail, Ordering::SeqCst);
        }

        /// Messages still visible in chats.
        pub async fn live(&self) -> Vec<SentMessage> {
            self.state.lock().await.live.values().cloned().collect()
        }

        /// Every message ever sent, in order.
        pub async fn history(&self) -> Vec<SentMessage> {
            self.state.lock().await.history.clone()
        }

        /// Successful deletions, in order.
        pub async fn deleted(&self) -> Vec<(ChatId, MessageId)> {
            self.state.lock().await.deleted.clone()
        }

        /// Successful forwarding restrictions, in order.
        pub async fn restricted(&self) -> Vec<(ChatId, OwnerId)> {
            self.state.lock().await.restricted.clone()
        }

        /// Remove a message out-of-band, as a user or admin would.
        pub async fn remove_externally(&self, chat: ChatId, message: MessageId) -> bool {
            self.state.lock().await.live.remove(&(chat, message)).is_some()
        }

        async fn record(&self, chat: ChatId, body: SentBody) -> MessageId {
            let mut state = self.state.lock().await;
            state.next_id += 1;
            let id = MessageId(state.next_id);
            let msg = SentMessage { chat, id, body };
            state.live.insert((chat, id), msg.clone());
            state.history.push(msg);
            id
        }
    }

    #[async_trait]
    impl MessagingTransport for MemoryMessenger {
        async fn send_protected(&self, chat: ChatId, media: &OutboundMedia) -> Result<MessageId> {
            if self.fail_sends.load(Ordering::SeqCst) {
                return Err(TransportError::Unavailable("send disabled".into()));
            }
            Ok(self.record(chat, SentBody::Media(media.clone())).await)
        }

        async fn send_text(&self, chat: ChatId, text: &str) -> Result<MessageId> {
            Ok(self.record(chat, SentBody::Text(text.to_string())).await)
        }

        async fn delete(&self, chat: ChatId, message: MessageId) -> Result<DeleteOutcome> {
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(TransportError::Unavailable("delete disabled".into()));
            }
            let mut state = self.state.lock().await;
            if state.live.remove(&(chat, message)).is_some() {
                state.deleted.push((chat, message));
                Ok(DeleteOutcome::Deleted)
            } else {
                Ok(DeleteOutcome::NotFound)
            }
        }

        async fn restrict_forwarding(&self, chat: ChatId, owner: OwnerId) -> Result<()> {
            if self.fail_restrict.load(Ordering::SeqCst) {
                return Err(TransportError::Rejected("not enough rights".into()));
            }
            self.state.lock().await.restricted.push((chat, owner));
            Ok(())
        }
    }
}
