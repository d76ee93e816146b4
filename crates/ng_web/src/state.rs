use std::sync::Arc;
use ng_newsapi::NewsQueryPipeline;

pub struct AppState {
    pub pipeline: Arc<NewsQueryPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<NewsQueryPipeline>) -> Self {
        Self { pipeline }
    }
}
