use std::sync::Arc;

use service::NewsService;

/// Handles shared by every request. Built once at startup, read-only afterwards.
#[derive(Clone)]
pub struct ServerState {
    pub news: Arc<NewsService>,
}

impl ServerState {
    pub fn new(news: NewsService) -> Self {
        Self { news: Arc::new(news) }
    }
}
