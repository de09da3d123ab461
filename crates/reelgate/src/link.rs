//! Link verification.
//!
//! A user unlocks content by presenting a shortened link whose last path
//! segment is the content reference.

use std::sync::Arc;

use async_trait::async_trait;

use reelgate_core::ContentRef;
use reelgate_store::ContentStore;

use crate::error::{GateError, Result};

/// Resolves a user-supplied link to a content reference.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Verify `url` and return the content it points to.
    ///
    /// Returns [`GateError::NotALink`] for input that is not a URL and
    /// [`GateError::InvalidLink`] for URLs that do not resolve.
    async fn verify(&self, url: &str) -> Result<ContentRef>;
}

/// Resolver for links issued through the configured URL shorteners.
pub struct ShortLinkResolver {
    domains: Vec<String>,
    catalog: Arc<dyn ContentStore>,
}

impl ShortLinkResolver {
    pub fn new<I, S>(domains: I, catalog: Arc<dyn ContentStore>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.into().to_ascii_lowercase())
                .collect(),
            catalog,
        }
    }

    /// Extract the content reference without consulting the catalog.
    pub fn parse(&self, url: &str) -> Result<ContentRef> {
        let parsed = url::Url::parse(url.trim()).map_err(|_| GateError::NotALink)?;
        if parsed.scheme() != "https" {
            return Err(GateError::InvalidLink(format!(
                "scheme {} is not accepted",
                parsed.scheme()
            )));
        }

        let host = parsed
            .host_str()
            .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
            .ok_or_else(|| GateError::InvalidLink("missing host".into()))?;
        if !self.domains.iter().any(|d| *d == host) {
            return Err(GateError::InvalidLink(format!("unknown host {host}")));
        }

        let segment = parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default();
        ContentRef::parse(segment).map_err(|e| GateError::InvalidLink(e.to_string()))
    }
}

#[async_trait]
impl LinkResolver for ShortLinkResolver {
    async fn verify(&self, url: &str) -> Result<ContentRef> {
        let content_ref = self.parse(url)?;
        if !self.catalog.contains(&content_ref).await? {
            return Err(GateError::InvalidLink(format!(
                "no content for {content_ref}"
            )));
        }
        Ok(content_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelgate_core::ContentRecord;
    use reelgate_store::MemoryCatalog;

    fn resolver() -> ShortLinkResolver {
        let record = ContentRecord {
            content_ref: ContentRef::parse("0f1e2d3c4b5a6978").unwrap(),
            title: "Harbor".into(),
            description: None,
            year: None,
            genre: None,
            media_locator: "file-9".into(),
        };
        ShortLinkResolver::new(
            ["get2short.com", "MODIJIURL.com"],
            Arc::new(MemoryCatalog::with_records([record])),
        )
    }

    #[tokio::test]
    async fn test_verify_known_link() {
        let r = resolver();
        let content = r
            .verify("https://get2short.com/0f1e2d3c4b5a6978")
            .await
            .unwrap();
        assert_eq!(content.as_str(), "0f1e2d3c4b5a6978");

        let content = r
            .verify("  https://modijiurl.com/x/0f1e2d3c4b5a6978?ref=tg \n")
            .await
            .unwrap();
        assert_eq!(content.as_str(), "0f1e2d3c4b5a6978");
    }

    #[tokio::test]
    async fn test_equivalent_url_forms() {
        let r = resolver();
        for url in [
            "https://get2short.com:443/0f1e2d3c4b5a6978",
            "HTTPS://get2short.com/0f1e2d3c4b5a6978",
            "https://get2short.com./0f1e2d3c4b5a6978",
            "https://get2short.com/0f1e2d3c4b5a6978/",
            "https://Get2Short.com/0f1e2d3c4b5a6978#top",
        ] {
            let content = r.verify(url).await.unwrap();
            assert_eq!(content.as_str(), "0f1e2d3c4b5a6978", "{url}");
        }
    }

    #[tokio::test]
    async fn test_not_a_link() {
        let r = resolver();
        assert!(matches!(
            r.verify("hello there").await,
            Err(GateError::NotALink)
        ));
    }

    #[tokio::test]
    async fn test_invalid_links() {
        let r = resolver();
        for url in [
            "http://get2short.com/0f1e2d3c4b5a6978",
            "https://evil.example/0f1e2d3c4b5a6978",
            "https://get2short.com/",
            "https://get2short.com/ffffffffffffffff",
            "https://get2short.com/%00",
            "https://get2short.com.evil.example/0f1e2d3c4b5a6978",
            "ftp://get2short.com/0f1e2d3c4b5a6978",
        ] {
            assert!(
                matches!(r.verify(url).await, Err(GateError::InvalidLink(_))),
                "{url}"
            );
        }
    }
}
