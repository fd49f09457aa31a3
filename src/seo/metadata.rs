//! Metadata builder
//!
//! Composes the fully-resolved head metadata for one request path. Pure over
//! `(document, path)`: nothing time- or environment-dependent leaks in.

use crate::seo::alternates::build_alternates;
use crate::seo::model::{RobotsDirectives, SeoDocument};
use crate::seo::resolve::resolve_override;
use crate::seo::robots::merge_robots;
use serde::Serialize;
use std::collections::BTreeMap;

pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Resolved record handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    pub title: String,
    pub description: String,
    pub alternates: Alternates,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub robots: RobotsDirectives,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<BTreeMap<String, String>>,
}

/// Canonical URL and locale map, always emitted together
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternates {
    pub canonical: String,
    pub languages: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub url: String,
    pub locale: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<OgImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Summary,
    SummaryLargeImage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwitterCard {
    pub card: CardKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

/// Resolve metadata for `requested` against `doc`
pub fn build_metadata(doc: &SeoDocument, requested: &str) -> ResolvedMetadata {
    let global = &doc.global;
    let page = resolve_override(doc, requested);

    let title = page
        .and_then(|p| p.title.clone())
        .unwrap_or_else(|| global.title.clone());
    let description = page
        .and_then(|p| p.description.clone())
        .unwrap_or_else(|| global.description.clone());

    let og_image = page
        .and_then(|p| p.og_image.as_deref())
        .unwrap_or(global.default_og_image.as_str())
        .trim();
    let og_image = (!og_image.is_empty()).then(|| og_image.to_string());

    let canonical = page
        .and_then(|p| p.canonical.clone())
        .unwrap_or_else(|| {
            let path = page.map_or(requested, |p| p.slug.as_str());
            join_url(&global.canonical_base, path)
        });

    let robots = merge_robots(&global.robots, page);
    let languages = build_alternates(global, page, requested);

    let og_title = page
        .and_then(|p| p.og_title.clone())
        .unwrap_or_else(|| title.clone());
    let og_description = page
        .and_then(|p| p.og_description.clone())
        .unwrap_or_else(|| description.clone());

    let open_graph = OpenGraph {
        title: og_title.clone(),
        description: og_description.clone(),
        site_name: global.site_name.clone(),
        url: canonical.clone(),
        locale: global.default_locale.clone(),
        images: og_image
            .iter()
            .map(|url| OgImage {
                url: url.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
            })
            .collect(),
    };

    let handle = global
        .twitter_handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string);

    let twitter = TwitterCard {
        card: if og_image.is_some() {
            CardKind::SummaryLargeImage
        } else {
            CardKind::Summary
        },
        title: og_title,
        description: og_description,
        images: og_image.into_iter().collect(),
        site: handle.clone(),
        creator: handle,
    };

    ResolvedMetadata {
        title,
        description,
        alternates: Alternates {
            canonical,
            languages,
        },
        open_graph,
        twitter,
        robots,
        verification: global.verification.clone(),
    }
}

/// `base` + `path` without doubling the separator
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
