use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use crate::types::PageResult;

#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Get a live entry for the page. Expired entries are never returned.
    async fn get(&self, page: u32) -> Option<Arc<PageResult>>;

    /// Store or replace the entry for the page, expiring `ttl` from now
    async fn set(&self, page: u32, result: Arc<PageResult>, ttl: Duration);
}
