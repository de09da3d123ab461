//! Gate configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use reelgate_delivery::{SchedulerConfig, DEFAULT_REMOVAL_NOTICE};

use crate::error::ConfigError;

/// Configuration for the [`Gate`](crate::Gate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Lifetime of an access grant.
    pub grant_ttl_secs: u64,
    /// How long delivered media stays in the chat.
    pub content_ttl_secs: u64,
    /// How long the removal notice stays.
    pub notice_delay_secs: u64,
    /// Hosts accepted as shortened links.
    pub shortener_domains: Vec<String>,
    pub removal_notice: String,
    /// Send media with forwarding and saving blocked.
    pub protect_content: bool,
    /// Period of the expired-grant sweeper. `None` leaves it off.
    pub sweep_interval_secs: Option<u64>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            grant_ttl_secs: 30 * 60,
            content_ttl_secs: 30 * 60,
            notice_delay_secs: 10,
            shortener_domains: vec!["get2short.com".into(), "modijiurl.com".into()],
            removal_notice: DEFAULT_REMOVAL_NOTICE.into(),
            protect_content: true,
            sweep_interval_secs: None,
        }
    }
}

impl GateConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GateConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_grant_ttl(mut self, ttl: Duration) -> Self {
        self.grant_ttl_secs = ttl.as_secs();
        self
    }

    pub fn with_content_ttl(mut self, ttl: Duration) -> Self {
        self.content_ttl_secs = ttl.as_secs();
        self
    }

    pub fn with_notice_delay(mut self, delay: Duration) -> Self {
        self.notice_delay_secs = delay.as_secs();
        self
    }

    pub fn with_shortener_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shortener_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_secs = Some(interval.as_secs());
        self
    }

    pub fn with_protect_content(mut self, protect: bool) -> Self {
        self.protect_content = protect;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grant_ttl_secs == 0 {
            return Err(ConfigError::ZeroDuration("grant_ttl_secs"));
        }
        if self.content_ttl_secs == 0 {
            return Err(ConfigError::ZeroDuration("content_ttl_secs"));
        }
        if self.sweep_interval_secs == Some(0) {
            return Err(ConfigError::ZeroDuration("sweep_interval_secs"));
        }
        if self.shortener_domains.is_empty() {
            return Err(ConfigError::NoShortenerDomains);
        }
        for domain in &self.shortener_domains {
            let bare = !domain.is_empty()
                && domain
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
            if !bare {
                return Err(ConfigError::InvalidDomain(domain.clone()));
            }
        }
        if self.removal_notice.trim().is_empty() {
            return Err(ConfigError::EmptyRemovalNotice);
        }
        Ok(())
    }

    pub fn grant_ttl(&self) -> Duration {
        Duration::from_secs(self.grant_ttl_secs)
    }

    pub fn content_ttl(&self) -> Duration {
        Duration::from_secs(self.content_ttl_secs)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_secs(self.notice_delay_secs)
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_secs.map(Duration::from_secs)
    }

    pub(crate) fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            notice_delay: self.notice_delay(),
            removal_notice: self.removal_notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GateConfig::default();
        config.validate().unwrap();
        assert_eq!(config.grant_ttl(), Duration::from_secs(1800));
        assert_eq!(config.notice_delay(), Duration::from_secs(10));
        assert_eq!(config.sweep_interval(), None);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = GateConfig::from_json_str(
            r#"{"content_ttl_secs": 600, "shortener_domains": ["sho.rt"]}"#,
        )
        .unwrap();
        assert_eq!(config.content_ttl_secs, 600);
        assert_eq!(config.grant_ttl_secs, 1800);
        assert_eq!(config.shortener_domains, vec!["sho.rt".to_string()]);
        assert!(config.protect_content);
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero = GateConfig::default().with_grant_ttl(Duration::ZERO);
        assert_eq!(
            zero.validate(),
            Err(ConfigError::ZeroDuration("grant_ttl_secs"))
        );

        let none = GateConfig::default().with_shortener_domains(Vec::<String>::new());
        assert_eq!(none.validate(), Err(ConfigError::NoShortenerDomains));

        let url = GateConfig::default().with_shortener_domains(["https://x.com/"]);
        assert!(matches!(url.validate(), Err(ConfigError::InvalidDomain(_))));

        assert!(matches!(
            GateConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
