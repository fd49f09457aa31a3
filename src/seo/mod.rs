//! SEO metadata engine
//!
//! Turns the stored authoring document (global defaults plus per-path
//! overrides) into resolved head metadata for any request path:
//! - path resolution with trailing-separator tolerance
//! - robots directive merging
//! - locale alternate derivation
//! - canonical / Open Graph / Twitter composition
//! - structured-data pass-through
//! - sitemap.xml and robots.txt rendering

pub mod alternates;
pub mod metadata;
pub mod model;
pub mod resolve;
pub mod robots;
pub mod sitemap;
pub mod structured_data;

pub use metadata::{build_metadata, ResolvedMetadata};
pub use model::{SeoDocument, StructuredData};
pub use resolve::resolve_override;
pub use robots::build_robots_txt;
pub use sitemap::build_sitemap;
pub use structured_data::structured_data;

use crate::store::StoredDocument;

impl StoredDocument for SeoDocument {
    const KIND: &'static str = "seo";

    fn fallback() -> Self {
        SeoDocument::default()
    }
}

/// Reasons a submitted document is refused before it is saved
pub fn validate_document(doc: &SeoDocument) -> Result<(), String> {
    let base = url::Url::parse(&doc.global.canonical_base)
        .map_err(|e| format!("canonicalBase is not an absolute URL: {}", e))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(format!(
            "canonicalBase must use http or https, got '{}'",
            base.scheme()
        ));
    }

    if let Some(page) = doc.pages.iter().find(|p| !p.slug.starts_with('/')) {
        return Err(format!("Page slug '{}' must start with '/'", page.slug));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::model::PageOverride;
    use crate::store::{DocumentStore, MemoryBackend};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_load_from_empty_store_is_usable() {
        let store: DocumentStore<SeoDocument> = DocumentStore::new(Arc::new(MemoryBackend::new()));
        let doc = store.load().await;
        assert!(!doc.global.canonical_base.is_empty());
        assert!(!doc.global.title.is_empty());
        assert!(doc.global.robots.index && doc.global.robots.follow);
        assert!(doc.pages.is_empty());

        let meta = build_metadata(&doc, "/anything");
        assert_eq!(meta.title, doc.global.title);
    }

    #[tokio::test]
    async fn test_save_load_round_trip_is_stable() {
        let backend = Arc::new(MemoryBackend::new());
        let store: DocumentStore<SeoDocument> = DocumentStore::new(backend.clone());

        let mut doc = store.load().await;
        doc.global.canonical_base = "https://site.example".to_string();
        doc.pages.push(PageOverride {
            title: Some("News".to_string()),
            noindex: Some(false),
            ..PageOverride::new("/news")
        });
        store.save(doc).await.unwrap();

        let first = DocumentStore::<SeoDocument>::new(backend.clone()).load().await;
        store.save(first.clone()).await.unwrap();
        let second = DocumentStore::<SeoDocument>::new(backend).load().await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_document() {
        let mut doc = SeoDocument::default();
        assert!(validate_document(&doc).is_ok());

        doc.pages.push(PageOverride::new("news"));
        assert!(validate_document(&doc).unwrap_err().contains("news"));

        doc.pages.clear();
        doc.global.canonical_base = "site.example".to_string();
        assert!(validate_document(&doc).is_err());

        doc.global.canonical_base = "ftp://site.example".to_string();
        assert!(validate_document(&doc).is_err());
    }
}
