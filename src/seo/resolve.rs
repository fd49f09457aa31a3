//! Path resolution
//!
//! Finds the page override for a request path. Two passes over `pages` in
//! order: first against the normalized path, then against the raw path, so a
//! slug registered with or without a trailing `/` still matches.

use crate::seo::model::{PageOverride, SeoDocument};

/// Strip a single trailing `/` unless the path is the root
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    }
}

/// First-match lookup of the override for `requested`
pub fn resolve_override<'a>(doc: &'a SeoDocument, requested: &str) -> Option<&'a PageOverride> {
    let normalized = normalize_path(requested);

    doc.pages
        .iter()
        .find(|page| page.slug == normalized)
        .or_else(|| doc.pages.iter().find(|page| page.slug == requested))
}
