use std::fmt;
use std::time::Duration;
use url::Url;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Search term sent upstream. Callers cannot change it.
pub const TOPIC: &str = "uae";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

const API_KEY_PARAM: &str = "apiKey";

/// Settings needed to reach the news API and to size cache entries.
#[derive(Clone)]
pub struct NewsApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl NewsApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Configuration("News API key is not configured".to_string()))
    }

    pub fn base_url(&self) -> Result<Url> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::Configuration("News API base URL is not configured".to_string()))?;

        let url = Url::parse(raw)
            .map_err(|e| Error::Configuration(format!("Invalid news API base URL {:?}: {}", raw, e)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "News API base URL must be an http(s) URL, got {:?}",
                raw
            )));
        }
        Ok(url)
    }

    /// Checks everything `request_url` needs, without a page number.
    pub fn validate(&self) -> Result<()> {
        self.api_key()?;
        self.base_url()?;
        Ok(())
    }

    /// Builds `{base}/everything?q=uae&apiKey=..&page=..`.
    /// The page is forwarded as given.
    pub fn request_url(&self, page: u32) -> Result<Url> {
        let api_key = self.api_key()?;
        let mut url = self.base_url()?;

        url.path_segments_mut()
            .map_err(|_| Error::Configuration("News API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push("everything");
        url.query_pairs_mut()
            .append_pair("q", TOPIC)
            .append_pair(API_KEY_PARAM, api_key)
            .append_pair("page", &page.to_string());

        Ok(url)
    }
}

/// Renders a request URL with the API key masked, for logging.
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "<redacted>".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
