pub mod client;
pub mod pipeline;

pub use client::NewsApiClient;
pub use pipeline::NewsQueryPipeline;

pub mod prelude {
    pub use super::client::NewsApiClient;
    pub use super::pipeline::NewsQueryPipeline;
    pub use ng_core::{Error, NewsApiConfig, PageResult, Result};
}
