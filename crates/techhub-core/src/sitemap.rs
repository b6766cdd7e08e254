//! sitemaps.org document for the portal's routes.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::Post;
use crate::markup::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Path relative to the site root, starting with `/`.
    pub loc: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
    pub lastmod: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    fn fixed(loc: &str, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            loc: loc.to_string(),
            changefreq,
            priority,
            lastmod: None,
        }
    }
}

pub fn static_pages() -> Vec<SitemapEntry> {
    vec![
        SitemapEntry::fixed("/", ChangeFreq::Daily, 1.0),
        SitemapEntry::fixed("/about", ChangeFreq::Monthly, 0.8),
        SitemapEntry::fixed("/articles", ChangeFreq::Daily, 0.9),
        SitemapEntry::fixed("/videos", ChangeFreq::Weekly, 0.8),
        SitemapEntry::fixed("/jobs", ChangeFreq::Daily, 0.9),
        SitemapEntry::fixed("/trending", ChangeFreq::Hourly, 0.8),
    ]
}

/// One `/articles/<slug>` entry per post; epoch dates are left out.
pub fn article_entries(posts: &[Post]) -> Vec<SitemapEntry> {
    posts
        .iter()
        .map(|post| SitemapEntry {
            loc: format!("/articles/{}", post.slug),
            changefreq: ChangeFreq::Weekly,
            priority: 0.7,
            lastmod: (post.date != DateTime::<Utc>::default()).then_some(post.date),
        })
        .collect()
}

pub fn render(base_url: &str, entries: &[SitemapEntry]) -> String {
    let base_url = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(&format!("{base_url}{}", entry.loc)));
        if let Some(lastmod) = entry.lastmod {
            let _ = writeln!(
                xml,
                "    <lastmod>{}</lastmod>",
                lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
        }
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq.as_str());
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
