use crate::fetcher::RecordFetcher;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn RecordFetcher>,
    pub page_limit: usize,
}

impl AppState {
    pub fn new(fetcher: impl RecordFetcher + 'static, page_limit: usize) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            page_limit,
        }
    }
}
