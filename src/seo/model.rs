//! SEO document model
//!
//! The persisted authoring document: one global block plus an ordered list of
//! per-path overrides. Every override field is optional; `None` means
//! "inherit from global", which is distinct from an explicit `false` or `""`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque structured-data payload attached to a page.
pub type StructuredData = serde_json::Map<String, serde_json::Value>;

/// Crawler-facing indexing directives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RobotsDirectives {
    pub index: bool,
    pub follow: bool,
    /// Crawler-specific preview limits, only ever taken from the global block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_bot: Option<CrawlerExtensions>,
}

impl Default for RobotsDirectives {
    fn default() -> Self {
        Self {
            index: true,
            follow: true,
            google_bot: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow: Option<bool>,
    /// `none`, `standard` or `large`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_image_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_snippet: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_video_preview: Option<i64>,
}

/// Site-wide defaults (one per deployment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSeoConfig {
    pub site_name: String,
    pub title: String,
    pub description: String,
    /// Absolute origin, e.g. `https://site.example`
    pub canonical_base: String,
    pub default_locale: String,
    pub locales: Vec<String>,
    pub default_og_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    pub robots: RobotsDirectives,
    pub sitemap_enabled: bool,
    /// Raw robots.txt served verbatim when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_txt: Option<String>,
    /// Search-engine verification tokens (engine name -> token)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<BTreeMap<String, String>>,
}

impl Default for GlobalSeoConfig {
    fn default() -> Self {
        Self {
            site_name: "My Site".to_string(),
            title: "My Site".to_string(),
            description: String::new(),
            canonical_base: "http://localhost:3000".to_string(),
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
            default_og_image: String::new(),
            twitter_handle: None,
            robots: RobotsDirectives::default(),
            sitemap_enabled: true,
            robots_txt: None,
            verification: None,
        }
    }
}

/// Per-path override. Slugs are not enforced unique; lookup is first-match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOverride {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Explicit locale -> path map; replaces derived alternates when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_alternates: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noindex: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nofollow: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<StructuredData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl PageOverride {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }
}

/// Unit of persistence: read and written as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoDocument {
    pub global: GlobalSeoConfig,
    pub pages: Vec<PageOverride>,
}

impl SeoDocument {
    /// Slugs that appear more than once, in first-seen order
    pub fn duplicate_slugs(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes: Vec<&str> = Vec::new();
        for page in &self.pages {
            if !seen.insert(page.slug.as_str()) && !dupes.contains(&page.slug.as_str()) {
                dupes.push(page.slug.as_str());
            }
        }
        dupes
    }
}
