use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ContentEntity;
use super::post::avatar_url;
use super::row::RowReader;
use crate::error::DecodeError;
use crate::ports::{Filter, Row};

const DEFAULT_COMPANY: &str = "Empresa Confidencial";
const DEFAULT_LOCATION: &str = "Remoto";
const DEFAULT_SALARY: &str = "A combinar";

/// Job listing aggregated from external boards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub company_logo: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub kind: JobKind,
    pub level: String,
    pub tags: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub views: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Remote,
    Hybrid,
    Onsite,
}

impl JobKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remote" => Some(JobKind::Remote),
            "hybrid" => Some(JobKind::Hybrid),
            "onsite" => Some(JobKind::Onsite),
            _ => None,
        }
    }

    /// Work arrangement implied by the free-text location and the tags.
    pub fn derive(location: &str, tags: &[String]) -> Self {
        let mentions = |needles: &[&str]| {
            std::iter::once(location)
                .chain(tags.iter().map(String::as_str))
                .map(str::to_lowercase)
                .any(|text| needles.iter().any(|needle| text.contains(needle)))
        };

        if mentions(&["remote", "remoto"]) {
            JobKind::Remote
        } else if mentions(&["hybrid", "híbrido", "hibrido"]) {
            JobKind::Hybrid
        } else {
            JobKind::Onsite
        }
    }
}

impl ContentEntity for Job {
    const TABLE: &'static str = "jobs";
    const KIND: &'static str = "job";
    const DEFAULT_LIMIT: usize = 5;

    fn from_row(row: Row) -> Result<Self, DecodeError> {
        let reader = RowReader::new(Self::KIND, &row);
        let id = reader.required_id("id")?;
        let title = reader.required_text("title")?;
        let tags = reader.tags("tags");
        let company = reader
            .text("company")
            .unwrap_or_else(|| DEFAULT_COMPANY.to_string());
        let location = reader
            .text("location")
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let kind = reader
            .text("type")
            .and_then(|raw| JobKind::parse(&raw))
            .unwrap_or_else(|| JobKind::derive(&location, &tags));

        Ok(Self {
            company_logo: reader
                .text("company_logo")
                .unwrap_or_else(|| avatar_url(&company)),
            salary: reader
                .text("salary")
                .unwrap_or_else(|| DEFAULT_SALARY.to_string()),
            level: reader
                .text("level")
                .unwrap_or_else(|| infer_level(&title).to_string()),
            date: reader.timestamp("created_at").unwrap_or_default(),
            url: reader.text_any(&["apply_url", "url"]),
            views: reader.count("views").unwrap_or(0),
            id,
            title,
            company,
            location,
            kind,
            tags,
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Location mentions "remote" (any case) or the tags hold exactly "remote".
    fn remote_filter() -> Filter {
        Filter::or(vec![
            Filter::ilike("location", "remote"),
            Filter::contains("tags", "remote"),
        ])
    }
}

fn infer_level(title: &str) -> &'static str {
    let title = title.to_lowercase();
    let has_word = |words: &[&str]| {
        title
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| words.contains(&token))
    };

    if has_word(&["senior", "sênior", "sr", "lead", "staff", "principal"]) {
        "Senior"
    } else if has_word(&["junior", "júnior", "jr", "intern", "estágio", "estagiário", "trainee"]) {
        "Junior"
    } else {
        "Pleno"
    }
}
