use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Page size reported to callers. The upstream decides how many items a page really holds.
pub const PAGE_SIZE: u32 = 20;

/// Status marker the upstream sends on success.
pub const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Article record as NewsAPI returns it. Keys are matched after lowercasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamArticle {
    pub source: Option<UpstreamSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urltoimage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedat")]
    pub published_at: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamEnvelope {
    pub status: Option<String>,
    #[serde(default, rename = "totalresults", deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<UpstreamArticle>,
    /// Only present on `status: "error"` replies.
    pub code: Option<String>,
    pub message: Option<String>,
}

impl UpstreamEnvelope {
    /// Parses a response body, matching keys case-insensitively, and rejects
    /// envelopes whose status marker is not `"ok"`.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::UpstreamPayload(format!("Body is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(Error::UpstreamPayload(
                "Body is not a JSON object".to_string(),
            ));
        }

        let envelope: Self = serde_json::from_value(lowercase_keys(value))
            .map_err(|e| Error::UpstreamPayload(format!("Unexpected envelope shape: {}", e)))?;
        envelope.ensure_ok()
    }

    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    fn ensure_ok(self) -> Result<Self> {
        if self.is_ok() {
            return Ok(self);
        }

        let status = self.status.as_deref().unwrap_or("<missing>");
        let reason = match (self.code.as_deref(), self.message.as_deref()) {
            (Some(code), Some(message)) => format!(" ({}: {})", code, message),
            (Some(code), None) => format!(" ({})", code),
            (None, Some(message)) => format!(" ({})", message),
            (None, None) => String::new(),
        };
        Err(Error::UpstreamPayload(format!(
            "Upstream status marker is {:?}{}",
            status, reason
        )))
    }
}

/// Article as exposed to callers. Only `image` may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedArticle {
    pub source: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: String,
}

/// One page of normalized results. Immutable once built, shared through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page: u32,
    pub page_size: u32,
    pub total_results: u64,
    pub items: Vec<NormalizedArticle>,
}

impl PageResult {
    pub fn new(page: u32, total_results: u64, items: Vec<NormalizedArticle>) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
            total_results,
            items,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
