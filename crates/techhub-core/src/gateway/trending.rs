use std::sync::Arc;

use super::Gateway;
use crate::domain::{ContentEntity, TrendingTopic};
use crate::ports::RemoteStore;

/// Ranks posts by views and relabels them as "Tutorial" or "Artigo".
///
/// Has no storage of its own; every call is a fresh read of `posts`.
#[derive(Clone)]
pub struct TrendingAggregator {
    topics: Gateway<TrendingTopic>,
}

impl TrendingAggregator {
    pub const DEFAULT_LIMIT: usize = TrendingTopic::DEFAULT_LIMIT;

    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            topics: Gateway::new(store),
        }
    }

    pub async fn fetch_trending(&self, limit: usize) -> Vec<TrendingTopic> {
        self.topics.get_top_by_views(limit).await
    }
}
