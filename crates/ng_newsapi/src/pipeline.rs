use ng_core::config::DEFAULT_CACHE_TTL;
use ng_core::{NormalizedArticle, PageResult, Result, ResultCache, UpstreamClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Read-through pipeline: cache first, upstream on a miss, cache the normalized page.
///
/// Concurrent misses for the same page may each reach the upstream; the last
/// write wins and both callers get equivalent data.
pub struct NewsQueryPipeline {
    upstream: Arc<dyn UpstreamClient>,
    cache: Arc<dyn ResultCache>,
    ttl: Duration,
}

impl NewsQueryPipeline {
    pub fn new(upstream: Arc<dyn UpstreamClient>, cache: Arc<dyn ResultCache>) -> Self {
        Self {
            upstream,
            cache,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get_news(&self, page: u32) -> Result<Arc<PageResult>> {
        if let Some(cached) = self.cache.get(page).await {
            info!("📦 Cache hit for page {}", page);
            return Ok(cached);
        }

        info!("📰 Cache miss for page {}, fetching from News API", page);
        // Errors leave the cache untouched.
        let envelope = self.upstream.fetch_page(page).await?;

        let total_results = envelope.total_results;
        let items = envelope
            .articles
            .into_iter()
            .map(NormalizedArticle::from)
            .collect();
        let result = Arc::new(PageResult::new(page, total_results, items));

        self.cache.set(page, result.clone(), self.ttl).await;
        info!(
            "✨ Cached page {} ({} items) for {}s",
            page,
            result.items.len(),
            self.ttl.as_secs()
        );

        Ok(result)
    }
}
