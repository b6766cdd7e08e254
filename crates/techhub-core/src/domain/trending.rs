use serde::{Deserialize, Serialize};

use super::row::RowReader;
use super::{ContentEntity, PostKind};
use crate::error::DecodeError;
use crate::ports::Row;

/// A post ranked by views, relabelled with a coarse category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub id: String,
    pub title: String,
    pub views: u64,
    pub category: String,
    pub slug: String,
}

impl ContentEntity for TrendingTopic {
    const TABLE: &'static str = "posts";
    const KIND: &'static str = "trending topic";
    const COLUMNS: &'static str = "id,title,slug,views,type";
    const DEFAULT_LIMIT: usize = 5;

    fn from_row(row: Row) -> Result<Self, DecodeError> {
        let reader = RowReader::new(Self::KIND, &row);
        let id = reader.required_id("id")?;

        let category = match PostKind::from_column(reader.text("type").as_deref()) {
            PostKind::Tutorial => "Tutorial",
            PostKind::Article => "Artigo",
        };

        Ok(Self {
            title: reader.required_text("title")?,
            views: reader.count("views").unwrap_or(0),
            category: category.to_string(),
            slug: reader.text("slug").unwrap_or_else(|| id.clone()),
            id,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_type() {
        let decode = |value: serde_json::Value| {
            TrendingTopic::from_row(value.as_object().cloned().unwrap()).unwrap()
        };

        let tutorial = decode(json!({ "id": 1, "title": "Nitro", "type": "tutorial", "views": 9 }));
        assert_eq!(tutorial.category, "Tutorial");
        assert_eq!(tutorial.views, 9);

        let news = decode(json!({ "id": 2, "title": "GPT-5", "type": "news", "views": null }));
        assert_eq!(news.category, "Artigo");
        assert_eq!(news.views, 0);
        assert_eq!(news.slug, "2");
    }
}
