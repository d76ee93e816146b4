use async_trait::async_trait;
use ng_core::config::redacted;
use ng_core::{Error, NewsApiConfig, Result, UpstreamClient, UpstreamEnvelope};
use reqwest::Client;
use std::fmt;
use tracing::{debug, error, warn};

const USER_AGENT: &str = concat!("newsgate/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the NewsAPI `everything` endpoint.
///
/// Every request is bounded by the configured timeout. There are no retries here;
/// a failed call is classified once and returned to the caller.
pub struct NewsApiClient {
    client: Client,
    config: NewsApiConfig,
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl UpstreamClient for NewsApiClient {
    async fn fetch_page(&self, page: u32) -> Result<UpstreamEnvelope> {
        let url = self.config.request_url(page)?;
        debug!("🌐 GET {}", redacted(&url));

        // Strip the URL from transport errors, it carries the API key.
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!("News API unreachable for page {}: {}", page, e);
            Error::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("News API returned status {}: {}", status, body);
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;
        let envelope = UpstreamEnvelope::parse(&body).map_err(|e| {
            error!("News API sent an unusable body for page {}: {}", page, e);
            e
        })?;

        debug!(
            "News API page {}: {} articles of {} total",
            page,
            envelope.articles.len(),
            envelope.total_results
        );
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NewsApiClient {
        NewsApiClient::new(NewsApiConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .and(query_param("q", "uae"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("page", "2"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 42,
                "articles": [
                    { "source": { "name": "S1" }, "title": "First" },
                    { "source": { "name": "S2" }, "title": "Second" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let envelope = client_for(&server).fetch_page(2).await.unwrap();
        assert_eq!(envelope.total_results, 42);
        assert_eq!(envelope.articles.len(), 2);
        assert_eq!(envelope.articles[1].title.as_deref(), Some("Second"));
    }

    #[tokio::test]
    async fn test_fetch_page_status_error_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"status":"error","code":"apiKeyInvalid"}"#),
            )
            .mount(&server)
            .await;

        match client_for(&server).fetch_page(1).await {
            Err(Error::UpstreamStatus { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("apiKeyInvalid"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_error_status_marker() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "error" })))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_page(1).await;
        assert!(matches!(result, Err(Error::UpstreamPayload(_))));
    }

    #[tokio::test]
    async fn test_fetch_page_unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_page(1).await;
        assert!(matches!(result, Err(Error::UpstreamPayload(_))));
    }

    #[tokio::test]
    async fn test_fetch_page_missing_key_skips_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut config = NewsApiConfig::default().with_base_url(server.uri());
        config.api_key = None;
        let client = NewsApiClient::new(config).unwrap();

        let result = client.fetch_page(1).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_fetch_page_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = NewsApiConfig::new("test-key").with_base_url(format!("http://127.0.0.1:{}", port));
        let client = NewsApiClient::new(config).unwrap();

        match client.fetch_page(1).await {
            Err(Error::Transport(e)) => {
                assert!(e.url().is_none(), "transport errors must not carry the keyed URL");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/everything"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ok", "totalResults": 0, "articles": [] }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = NewsApiConfig::new("test-key")
            .with_base_url(server.uri())
            .with_timeout(Duration::from_millis(200));
        let client = NewsApiClient::new(config).unwrap();

        match client.fetch_page(1).await {
            Err(Error::Transport(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = NewsApiClient::new(NewsApiConfig::new("hidden-key")).unwrap();
        assert!(!format!("{:?}", client).contains("hidden-key"));
    }
}
