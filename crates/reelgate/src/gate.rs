//! The Gate: unified API for time-boxed media access.
//!
//! The Gate wires link verification, grant issuance and protected delivery
//! into the two operations a chat front end needs.

use std::sync::Arc;
use std::time::Duration;

use reelgate_access::{AccessValidator, TokenIssuer};
use reelgate_core::{
    AccessToken, ActionRequest, ActionTag, ChatId, Clock, ContentRecord, Denial, MessageId,
    OwnerId,
};
use reelgate_delivery::{
    ContentDeliveryGate, DeferredActionScheduler, Delivery, DeliveryRequest, MessagingTransport,
};
use reelgate_store::{ContentStore, GrantStore};

use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::link::{LinkResolver, ShortLinkResolver};
use crate::sweeper::spawn_sweeper;

/// A grant as handed back to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedGrant {
    pub token: AccessToken,
    pub content: ContentRecord,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl IssuedGrant {
    /// The action string for `tag`, ready to use as a button payload.
    pub fn action(&self, tag: ActionTag) -> String {
        ActionRequest::new(tag, self.token.clone()).encode()
    }

    /// Button labels and payloads, in display order.
    pub fn actions(&self) -> [(&'static str, String); 2] {
        ActionTag::ALL.map(|tag| (tag.label(), self.action(tag)))
    }

    /// Verification reply shown with the action buttons.
    pub fn announcement(&self) -> String {
        let lifetime = self.expires_at.saturating_sub(self.issued_at).max(0);
        let minutes = whole_minutes(Duration::from_millis(lifetime as u64));
        format!(
            "✅ URL Verified Successfully!\n\n{}\n\n⚠️ Links expire in {} minutes!\nChoose your preferred option:",
            self.content.summary(),
            minutes
        )
    }
}

/// Whole minutes for user-facing text, rounded up.
fn whole_minutes(d: Duration) -> u128 {
    d.as_millis().div_ceil(60_000)
}

/// The main Gate struct.
///
/// Provides:
/// - Link verification and grant issuance
/// - Action validation and protected delivery
/// - Scheduled removal of everything delivered
pub struct Gate {
    config: GateConfig,
    grants: Arc<dyn GrantStore>,
    catalog: Arc<dyn ContentStore>,
    clock: Arc<dyn Clock>,
    resolver: Arc<dyn LinkResolver>,
    issuer: TokenIssuer,
    delivery: ContentDeliveryGate,
}

impl Gate {
    /// Create a gate. Fails if `config` does not validate.
    pub fn new(
        config: GateConfig,
        grants: Arc<dyn GrantStore>,
        catalog: Arc<dyn ContentStore>,
        transport: Arc<dyn MessagingTransport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let resolver = Arc::new(ShortLinkResolver::new(
            config.shortener_domains.iter().cloned(),
            catalog.clone(),
        ));
        let issuer =
            TokenIssuer::new(grants.clone(), clock.clone()).with_ttl(config.grant_ttl());
        let validator = Arc::new(AccessValidator::new(grants.clone(), clock.clone()));
        let scheduler = DeferredActionScheduler::new(
            transport.clone(),
            clock.clone(),
            config.scheduler_config(),
        );
        let delivery = ContentDeliveryGate::new(
            validator,
            catalog.clone(),
            transport,
            scheduler,
            clock.clone(),
        )
        .with_content_ttl(config.content_ttl())
        .with_protect_content(config.protect_content);

        Ok(Self {
            config,
            grants,
            catalog,
            clock,
            resolver,
            issuer,
            delivery,
        })
    }

    /// Replace the link resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn LinkResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &DeferredActionScheduler {
        self.delivery.scheduler()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify `url` and grant `owner` access to the content behind it.
    ///
    /// Supersedes any grant the owner already held.
    pub async fn issue_grant(&self, owner: OwnerId, url: &str) -> Result<IssuedGrant> {
        let content_ref = match self.resolver.verify(url).await {
            Ok(content_ref) => content_ref,
            Err(e) => {
                tracing::debug!(owner = %owner, error = %e, "link rejected");
                return Err(e);
            }
        };

        let content = self
            .catalog
            .lookup(&content_ref)
            .await?
            .ok_or_else(|| GateError::ContentNotFound(content_ref.clone()))?;

        let grant = self.issuer.issue(owner, content_ref).await?;
        Ok(IssuedGrant {
            token: grant.token,
            content,
            issued_at: grant.issued_at,
            expires_at: grant.expires_at,
        })
    }

    /// Perform the action encoded in `action` (`"<tag>_<token>"`).
    ///
    /// A string that does not parse is denied as malformed before any state
    /// is read. `reply_to` threads the delivered media under that message.
    pub async fn perform_action(
        &self,
        owner: OwnerId,
        chat: ChatId,
        reply_to: Option<MessageId>,
        action: &str,
    ) -> Result<Delivery> {
        let action = match ActionRequest::parse(action) {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(
                    owner = %owner,
                    error = %e,
                    reason = %Denial::MalformedAction,
                    "access denied"
                );
                return Err(GateError::Denied(Denial::MalformedAction));
            }
        };

        let delivery = self
            .delivery
            .deliver(DeliveryRequest {
                owner,
                chat,
                action,
                reply_to,
            })
            .await?;
        Ok(delivery)
    }

    /// Confirmation shown after a delivery.
    pub fn acknowledgement(&self) -> String {
        format!(
            "File sent! It will be automatically deleted in {} minutes.",
            whole_minutes(self.config.content_ttl())
        )
    }

    /// Start the expired-grant sweeper if one is configured.
    pub fn start_sweeper(
        &self,
        shutdown: tokio::sync::watch::Receiver<bool>,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let interval = self.config.sweep_interval()?;
        tracing::info!(interval_secs = interval.as_secs(), "starting grant sweeper");
        Some(spawn_sweeper(
            self.grants.clone(),
            self.clock.clone(),
            interval,
            shutdown,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelgate_core::{ContentRef, ManualClock};
    use reelgate_delivery::MemoryMessenger;
    use reelgate_store::{MemoryCatalog, MemoryGrantStore};

    fn gate(config: GateConfig) -> Result<Gate> {
        let record = ContentRecord {
            content_ref: ContentRef::parse("c0ffee00c0ffee00").unwrap(),
            title: "Dune Road".into(),
            description: Some("Sand".into()),
            year: None,
            genre: None,
            media_locator: "file-1".into(),
        };
        Gate::new(
            config,
            Arc::new(MemoryGrantStore::new()),
            Arc::new(MemoryCatalog::with_records([record])),
            Arc::new(MemoryMessenger::new()),
            Arc::new(ManualClock::new(0)),
        )
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = GateConfig::default().with_shortener_domains(Vec::<String>::new());
        assert!(matches!(gate(config), Err(GateError::Config(_))));
    }

    #[tokio::test]
    async fn test_issued_grant_texts() {
        let gate = gate(GateConfig::default()).unwrap();
        let issued = gate
            .issue_grant(OwnerId(3), "https://get2short.com/c0ffee00c0ffee00")
            .await
            .unwrap();

        let [(dl_label, dl), (str_label, stream)] = issued.actions();
        assert_eq!(dl_label, "📥 Download");
        assert_eq!(str_label, "▶️ Stream");
        assert_eq!(dl, format!("dl_{}", issued.token.encode()));
        assert_eq!(stream, format!("str_{}", issued.token.encode()));
        assert!(stream.len() <= 64);

        let text = issued.announcement();
        assert!(text.starts_with("✅ URL Verified Successfully!"));
        assert!(text.contains("🎥 *Dune Road*"));
        assert!(text.contains("⚠️ Links expire in 30 minutes!"));
        assert_eq!(
            gate.acknowledgement(),
            "File sent! It will be automatically deleted in 30 minutes."
        );
    }

    #[tokio::test]
    async fn test_partial_minutes_round_up() {
        let config = GateConfig::default()
            .with_grant_ttl(Duration::from_secs(90))
            .with_content_ttl(Duration::from_secs(59));
        let gate = gate(config).unwrap();
        let issued = gate
            .issue_grant(OwnerId(3), "https://get2short.com/c0ffee00c0ffee00")
            .await
            .unwrap();

        assert!(issued.announcement().contains("⚠️ Links expire in 2 minutes!"));
        assert_eq!(
            gate.acknowledgement(),
            "File sent! It will be automatically deleted in 1 minutes."
        );
    }

    struct FixedResolver(ContentRef);

    #[async_trait::async_trait]
    impl LinkResolver for FixedResolver {
        async fn verify(&self, _url: &str) -> Result<ContentRef> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_custom_resolver_replaces_shortener_check() {
        let content_ref = ContentRef::parse("c0ffee00c0ffee00").unwrap();
        let gate = gate(GateConfig::default())
            .unwrap()
            .with_resolver(Arc::new(FixedResolver(content_ref.clone())));

        let issued = gate
            .issue_grant(OwnerId(4), "https://elsewhere.example/anything")
            .await
            .unwrap();
        assert_eq!(issued.content.content_ref, content_ref);
        assert_eq!(issued.content.title, "Dune Road");
    }

    #[tokio::test]
    async fn test_sweeper_off_by_default() {
        let gate = gate(GateConfig::default()).unwrap();
        let (_tx, rx) = tokio::sync::watch::channel(false);
        assert!(gate.start_sweeper(rx).is_none());
    }
}
