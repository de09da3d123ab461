//! The content delivery gate.

use std::sync::Arc;
use std::time::Duration;

use reelgate_access::{AccessValidator, Verdict};
use reelgate_core::{
    duration_millis, ActionRequest, ChatId, Clock, ContentRef, MediaKind, MessageId, OwnerId,
};
use reelgate_store::ContentStore;

use crate::error::{DeliveryError, Result};
use crate::scheduler::{DeferredActionKind, DeferredActionScheduler, DEFAULT_CONTENT_TTL};
use crate::transport::{MessagingTransport, OutboundMedia};

/// Where a delivery attempt got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeliveryStage {
    Requested,
    Validated,
    Restricted,
    Delivered,
    ScheduledForExpiry,
}

impl DeliveryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStage::Requested => "requested",
            DeliveryStage::Validated => "validated",
            DeliveryStage::Restricted => "restricted",
            DeliveryStage::Delivered => "delivered",
            DeliveryStage::ScheduledForExpiry => "scheduled_for_expiry",
        }
    }
}

/// A request to deliver the content behind a grant.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub owner: OwnerId,
    pub chat: ChatId,
    pub action: ActionRequest,
    /// The message that triggered the action, for threading.
    pub reply_to: Option<MessageId>,
}

/// A completed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub chat: ChatId,
    pub message: MessageId,
    pub content_ref: ContentRef,
    pub kind: MediaKind,
    pub title: String,
    /// When the media is due to be deleted (Unix ms).
    pub expires_at: i64,
    /// Whether forwarding was restricted before sending.
    pub restricted: bool,
    pub stage: DeliveryStage,
}

/// Validates action requests and delivers protected, self-expiring media.
pub struct ContentDeliveryGate {
    validator: Arc<AccessValidator>,
    catalog: Arc<dyn ContentStore>,
    transport: Arc<dyn MessagingTransport>,
    scheduler: DeferredActionScheduler,
    clock: Arc<dyn Clock>,
    content_ttl: Duration,
    protect_content: bool,
}

impl ContentDeliveryGate {
    pub fn new(
        validator: Arc<AccessValidator>,
        catalog: Arc<dyn ContentStore>,
        transport: Arc<dyn MessagingTransport>,
        scheduler: DeferredActionScheduler,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            validator,
            catalog,
            transport,
            scheduler,
            clock,
            content_ttl: DEFAULT_CONTENT_TTL,
            protect_content: true,
        }
    }

    /// How long delivered media lives.
    pub fn with_content_ttl(mut self, ttl: Duration) -> Self {
        self.content_ttl = ttl;
        self
    }

    /// Whether media is sent with the platform's protection flag.
    pub fn with_protect_content(mut self, protect: bool) -> Self {
        self.protect_content = protect;
        self
    }

    pub fn scheduler(&self) -> &DeferredActionScheduler {
        &self.scheduler
    }

    /// Deliver the content behind the requester's grant.
    ///
    /// A denial stops the attempt before the transport is touched. A failed
    /// forwarding restriction is logged and delivery continues. A failed send
    /// returns an error and schedules nothing.
    pub async fn deliver(&self, req: DeliveryRequest) -> Result<Delivery> {
        let tag = req.action.tag;
        tracing::debug!(
            owner = %req.owner,
            action = %tag,
            stage = DeliveryStage::Requested.as_str(),
            "delivery requested"
        );

        let grant = match self
            .validator
            .validate(req.owner, &req.action.token, tag)
            .await?
        {
            Verdict::Granted(grant) => grant,
            Verdict::Denied(reason) => return Err(DeliveryError::Denied(reason)),
        };

        let record = self
            .catalog
            .lookup(&grant.content_ref)
            .await?
            .ok_or_else(|| DeliveryError::ContentNotFound(grant.content_ref.clone()))?;

        let restricted = match self
            .transport
            .restrict_forwarding(req.chat, req.owner)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    owner = %req.owner,
                    chat = %req.chat,
                    error = %e,
                    "could not restrict forwarding"
                );
                false
            }
        };

        let media = OutboundMedia {
            locator: record.media_locator.clone(),
            kind: tag.media_kind(),
            caption: record.caption(),
            protect_content: self.protect_content,
            reply_to: req.reply_to,
        };
        let message = match self.transport.send_protected(req.chat, &media).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    owner = %req.owner,
                    chat = %req.chat,
                    content_ref = %record.content_ref,
                    error = %e,
                    "media send failed"
                );
                return Err(e.into());
            }
        };

        self.scheduler.schedule(
            DeferredActionKind::DeleteContent,
            req.chat,
            message,
            self.content_ttl,
        );
        let expires_at = self
            .clock
            .now_millis()
            .saturating_add(duration_millis(self.content_ttl));

        tracing::info!(
            owner = %req.owner,
            chat = %req.chat,
            message = %message,
            action = %tag,
            content_ref = %record.content_ref,
            restricted,
            "delivered protected media"
        );

        Ok(Delivery {
            chat: req.chat,
            message,
            content_ref: record.content_ref,
            kind: media.kind,
            title: record.title,
            expires_at,
            restricted,
            stage: DeliveryStage::ScheduledForExpiry,
        })
    }
}
