use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentEntity;
use super::row::RowReader;
use crate::error::DecodeError;
use crate::ports::Row;

const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/640x360/0f172a/e2e8f0?text=Video";
const DEFAULT_CHANNEL: &str = "Canal desconhecido";
const DEFAULT_DURATION: &str = "00:00";

/// Curated video from a tracked channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel: String,
    /// `mm:ss` (or `h:mm:ss` for long recordings).
    pub duration: String,
    pub views: u64,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub url: String,
}

impl ContentEntity for Video {
    const TABLE: &'static str = "videos";
    const KIND: &'static str = "video";
    const DEFAULT_LIMIT: usize = 4;

    fn from_row(row: Row) -> Result<Self, DecodeError> {
        let reader = RowReader::new(Self::KIND, &row);

        Ok(Self {
            id: reader.required_id("id")?,
            title: reader.required_text("title")?,
            thumbnail: reader
                .text("thumbnail")
                .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
            channel: reader
                .text("channel")
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            duration: reader
                .text("duration")
                .filter(|d| is_clock_duration(d))
                .unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            views: reader.count("views").unwrap_or(0),
            date: reader
                .timestamp("published_at")
                .or_else(|| reader.timestamp("created_at"))
                .unwrap_or_default(),
            tags: reader.tags("tags"),
            url: reader.text("url").unwrap_or_else(|| "#".to_string()),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// `mm:ss` or `h:mm:ss`, seconds and inner minutes below 60.
fn is_clock_duration(raw: &str) -> bool {
    let parts: Vec<&str> = raw.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return false;
    }
    parts.iter().enumerate().all(|(i, part)| {
        let bounded = i > 0;
        !part.is_empty()
            && part.chars().all(|c| c.is_ascii_digit())
            && (!bounded || (part.len() == 2 && part.parse::<u32>().is_ok_and(|v| v < 60)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rss_row_prefers_published_at() {
        let row = json!({
            "id": "v1",
            "title": "Vue 3 Composition API",
            "channel": "Vue Mastery BR",
            "duration": "32:10",
            "views": "N/A",
            "published_at": "2026-01-24T09:30:00+00:00",
            "created_at": "2026-02-01T00:00:00+00:00",
            "url": "https://www.youtube.com/watch?v=abc",
        });
        let video = Video::from_row(row.as_object().cloned().unwrap()).unwrap();

        assert_eq!(video.views, 0);
        assert_eq!(video.duration, "32:10");
        assert_eq!(video.date.to_rfc3339(), "2026-01-24T09:30:00+00:00");
        assert_eq!(video.thumbnail, PLACEHOLDER_THUMBNAIL);
        assert!(video.tags.is_empty());
    }

    #[test]
    fn test_duration_shape() {
        assert!(is_clock_duration("15:28"));
        assert!(is_clock_duration("1:02:03"));
        assert!(!is_clock_duration("10"));
        assert!(!is_clock_duration("10:75"));
        assert!(!is_clock_duration("PT10M"));
    }
}
