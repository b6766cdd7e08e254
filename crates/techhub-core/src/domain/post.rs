use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentEntity;
use super::row::RowReader;
use crate::error::DecodeError;
use crate::ports::Row;

pub(crate) const PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/800x450/0f172a/e2e8f0?text=TechHub";
const DEFAULT_CATEGORY: &str = "Geral";
const EDITORIAL_NAME: &str = "TechHub Editorial";
const WORDS_PER_MINUTE: usize = 200;

/// Article or tutorial published on the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub read_time: u32,
    pub author: Author,
    pub tags: Vec<String>,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub featured: bool,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Author {
    fn editorial() -> Self {
        Self {
            id: "techhub".to_string(),
            name: EDITORIAL_NAME.to_string(),
            avatar: avatar_url(EDITORIAL_NAME),
            role: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Article,
    Tutorial,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Article => "article",
            PostKind::Tutorial => "tutorial",
        }
    }

    /// Anything other than an explicit `tutorial` is an article.
    pub fn from_column(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(kind) if kind == "tutorial" => PostKind::Tutorial,
            _ => PostKind::Article,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "article" => Some(PostKind::Article),
            "tutorial" => Some(PostKind::Tutorial),
            _ => None,
        }
    }
}

impl ContentEntity for Post {
    const TABLE: &'static str = "posts";
    const KIND: &'static str = "post";
    const DEFAULT_LIMIT: usize = 5;

    fn from_row(row: Row) -> Result<Self, DecodeError> {
        let reader = RowReader::new(Self::KIND, &row);
        let id = reader.required_id("id")?;
        let title = reader.required_text("title")?;
        let tags = reader.tags("tags");
        let content = reader.text("content").unwrap_or_default();

        let category = reader
            .text("category")
            .or_else(|| tags.first().cloned())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let read_time = reader
            .count("read_time")
            .filter(|minutes| *minutes > 0)
            .map(|minutes| minutes.min(u32::MAX as u64) as u32)
            .unwrap_or_else(|| estimate_read_time(&content));

        Ok(Self {
            slug: reader.text("slug").unwrap_or_else(|| id.clone()),
            excerpt: reader.text("excerpt").unwrap_or_default(),
            image: reader
                .text_any(&["image_url", "image"])
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            date: reader.timestamp("created_at").unwrap_or_default(),
            author: decode_author(&reader),
            kind: PostKind::from_column(reader.text("type").as_deref()),
            featured: reader.flag("featured").unwrap_or(false),
            views: reader.count("views").unwrap_or(0),
            id,
            title,
            content,
            category,
            read_time,
            tags,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Author comes either as an embedded object or as flat `author_*` columns.
fn decode_author(reader: &RowReader<'_>) -> Author {
    if let Some(embedded) = reader.object("author") {
        let nested = RowReader::new("author", embedded);
        if let Some(name) = nested.text("name") {
            return Author {
                id: nested
                    .text("id")
                    .or_else(|| embedded.get("id").and_then(|v| v.as_i64()).map(|v| v.to_string()))
                    .unwrap_or_else(|| name.to_lowercase().replace(' ', "-")),
                avatar: nested
                    .text("avatar")
                    .unwrap_or_else(|| avatar_url(&name)),
                role: nested.text("role"),
                name,
            };
        }
    }

    match reader.text("author_name") {
        Some(name) => Author {
            id: reader
                .text("author_id")
                .unwrap_or_else(|| name.to_lowercase().replace(' ', "-")),
            avatar: reader
                .text("author_avatar")
                .unwrap_or_else(|| avatar_url(&name)),
            role: reader.text("author_role"),
            name,
        },
        None => Author::editorial(),
    }
}

/// Generated avatar keyed by a display name.
pub(crate) fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random&size=128",
        urlencoding::encode(name)
    )
}

/// Minutes to read `content`, ignoring markup tags; never below one.
fn estimate_read_time(content: &str) -> u32 {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn decode(value: Value) -> Result<Post, DecodeError> {
        Post::from_row(value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_minimal_row_gets_defaults() {
        let post = decode(json!({ "id": "p1", "title": "Nuxt 4 chegou" })).unwrap();

        assert_eq!(post.slug, "p1");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.image, PLACEHOLDER_IMAGE);
        assert_eq!(post.category, "Geral");
        assert_eq!(post.read_time, 1);
        assert_eq!(post.author.name, "TechHub Editorial");
        assert_eq!(post.kind, PostKind::Article);
        assert!(!post.featured);
        assert_eq!(post.views, 0);
        assert_eq!(post.date, DateTime::<Utc>::default());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_category_falls_back_to_first_tag() {
        let post = decode(json!({
            "id": "p1",
            "title": "Vue 3.5",
            "tags": ["Vue", "Performance"],
        }))
        .unwrap();
        assert_eq!(post.category, "Vue");

        let post = decode(json!({
            "id": "p1",
            "title": "Vue 3.5",
            "category": "Frontend",
            "tags": ["Vue"],
        }))
        .unwrap();
        assert_eq!(post.category, "Frontend");
    }

    #[test]
    fn test_store_columns_are_mapped() {
        let post = decode(json!({
            "id": 7,
            "slug": "apis-nitro-guia-iniciantes",
            "title": "Construindo APIs com Nitro",
            "image_url": "https://cdn.example.com/nitro.png",
            "type": "tutorial",
            "featured": true,
            "views": 120,
            "created_at": "2026-01-24T11:00:00+00:00",
            "author": { "id": "a2", "name": "Carlos Mendes", "role": "Editor" },
        }))
        .unwrap();

        assert_eq!(post.id, "7");
        assert_eq!(post.image, "https://cdn.example.com/nitro.png");
        assert_eq!(post.kind, PostKind::Tutorial);
        assert!(post.featured);
        assert_eq!(post.views, 120);
        assert_eq!(post.author.id, "a2");
        assert_eq!(post.author.role.as_deref(), Some("Editor"));
        assert!(post.author.avatar.contains("Carlos%20Mendes"));
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let err = decode(json!({ "id": "p1", "title": "   " })).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                entity: "post",
                field: "title"
            }
        );

        let err = decode(json!({ "title": "Sem id" })).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field: "id", .. }));
    }

    #[test]
    fn test_read_time_estimated_from_content() {
        let words = vec!["palavra"; 450].join(" ");
        let post = decode(json!({
            "id": "p1",
            "title": "Longo",
            "content": format!("<p>{words}</p>"),
        }))
        .unwrap();
        assert_eq!(post.read_time, 3);
    }

    #[test]
    fn test_serializes_camel_case_with_type() {
        let post = decode(json!({ "id": "p1", "title": "T", "read_time": 4 })).unwrap();
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["readTime"], 4);
        assert_eq!(value["type"], "article");
    }
}
