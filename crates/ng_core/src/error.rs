use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable upstream settings. Not retryable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream host could not be reached (timeout, DNS, refused connection).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream host answered with a non-success HTTP status.
    /// `body` is kept for logs and must not reach API callers.
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream answered 2xx but the envelope was unusable.
    #[error("Upstream payload error: {0}")]
    UpstreamPayload(String),
}

impl Error {
    /// True for failures caused by the upstream service rather than by local setup.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Error::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_hides_body() {
        let err = Error::UpstreamStatus {
            status: 401,
            body: r#"{"status":"error","code":"apiKeyInvalid"}"#.to_string(),
        };
        assert_eq!(err.to_string(), "Upstream returned HTTP 401");
        assert!(err.is_upstream());
    }

    #[test]
    fn test_configuration_is_not_upstream() {
        let err = Error::Configuration("NEWS_API_KEY is not configured".to_string());
        assert!(!err.is_upstream());
    }
}
