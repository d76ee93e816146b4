use axum::{
    extract::{rejection::QueryRejection, Query, RawQuery, State},
    Json,
};
use ng_core::PageResult;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

const DEFAULT_PAGE: u32 = 1;

#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub page: Option<String>,
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    RawQuery(raw): RawQuery,
    params: Result<Query<NewsParams>, QueryRejection>,
) -> Result<Json<Arc<PageResult>>, ApiError> {
    let Query(params) = params.map_err(|_| ApiError::InvalidPage(raw_page_values(raw.as_deref())))?;
    let page = parse_page(params.page.as_deref())?;
    let result = state.pipeline.get_news(page).await?;
    Ok(Json(result))
}

/// Pages start at 1. Anything else is rejected before reaching the pipeline.
pub fn parse_page(raw: Option<&str>) -> Result<u32, ApiError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_PAGE);
    };

    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|page| *page >= 1)
        .and_then(|page| u32::try_from(page).ok())
        .ok_or_else(|| ApiError::InvalidPage(raw.to_string()))
}

/// Every `page=` value of a query string that failed to deserialize, comma-joined.
fn raw_page_values(query: Option<&str>) -> String {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.strip_prefix("page="))
        .collect::<Vec<_>>()
        .join(",")
}
