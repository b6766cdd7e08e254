use super::Gateway;
use crate::domain::Video;
use crate::ports::Filter;

impl Gateway<Video> {
    /// Up to `limit` other videos sharing the primary tag of `current_id`.
    pub async fn get_related(&self, current_id: &str, limit: usize) -> Vec<Video> {
        let Some(current) = self.get_by_id(current_id).await else {
            return Vec::new();
        };
        let Some(primary_tag) = current.tags.first() else {
            return Vec::new();
        };

        let query = Self::newest_first()
            .filter(Filter::contains("tags", primary_tag.as_str()))
            .filter(Filter::neq("id", current_id))
            .limit(limit.saturating_add(1));

        self.fetch("get_related", query)
            .await
            .into_iter()
            .filter(|video| video.id != current.id)
            .take(limit)
            .collect()
    }
}
