pub mod cache;
pub mod config;
pub mod error;
pub mod mapper;
pub mod types;
pub mod upstream;

pub use cache::ResultCache;
pub use config::NewsApiConfig;
pub use error::{Error, Result};
pub use mapper::map_article;
pub use types::{
    NormalizedArticle, PageResult, UpstreamArticle, UpstreamEnvelope, UpstreamSource, PAGE_SIZE,
};
pub use upstream::UpstreamClient;

pub mod prelude {
    pub use crate::{Error, NewsApiConfig, PageResult, Result, ResultCache, UpstreamClient};
}
