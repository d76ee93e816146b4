use async_trait::async_trait;
use crate::types::UpstreamEnvelope;
use crate::Result;

#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Fetch one page of results for the configured topic
    async fn fetch_page(&self, page: u32) -> Result<UpstreamEnvelope>;
}
