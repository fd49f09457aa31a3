//! Sitemap generation.
//!
//! Builds sitemap.xml from the SEO document: the root first, then every
//! distinct slug in document order, `/news` and `/news/` counting as one.
//! Pages resolving to `noindex` are left out.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!   <url>
//!     <loc>https://site.example/news</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <priority>0.8</priority>
//!     <xhtml:link rel="alternate" hreflang="es" href="https://site.example/es/news"/>
//!   </url>
//! </urlset>
//! ```

use crate::seo::metadata::{build_metadata, join_url};
use crate::seo::model::SeoDocument;
use crate::seo::resolve::{normalize_path, resolve_override};
use std::borrow::Cow;
use std::collections::HashSet;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, PartialEq)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub priority: Option<f64>,
    /// (hreflang, absolute href)
    pub alternates: Vec<(String, String)>,
}

/// `None` when the sitemap is disabled globally.
pub fn build_sitemap(doc: &SeoDocument) -> Option<Sitemap> {
    if !doc.global.sitemap_enabled {
        return None;
    }

    let mut seen = HashSet::new();
    let slugs = std::iter::once("/")
        .chain(doc.pages.iter().map(|page| page.slug.as_str()))
        .filter(|slug| seen.insert(normalize_path(*slug)));

    let urls = slugs
        .filter_map(|slug| {
            let meta = build_metadata(doc, slug);
            if !meta.robots.index {
                return None;
            }

            let page = resolve_override(doc, slug);
            Some(UrlEntry {
                loc: meta.alternates.canonical,
                lastmod: page.and_then(|p| p.last_modified.clone()),
                priority: page.and_then(|p| p.priority).map(|p| p.clamp(0.0, 1.0)),
                alternates: meta
                    .alternates
                    .languages
                    .into_iter()
                    .map(|(locale, path)| (locale, join_url(&doc.global.canonical_base, &path)))
                    .collect(),
            })
        })
        .collect();

    Some(Sitemap { urls })
}

impl Sitemap {
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<urlset xmlns=\"{SITEMAP_NS}\" xmlns:xhtml=\"{XHTML_NS}\">\n"
        ));

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&escape_xml(&lastmod));
                xml.push_str("</lastmod>\n");
            }
            if let Some(priority) = entry.priority {
                xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
            }
            for (lang, href) in entry.alternates {
                xml.push_str(&format!(
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                    escape_xml(&lang),
                    escape_xml(&href)
                ));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
