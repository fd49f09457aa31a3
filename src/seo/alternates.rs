//! Locale alternates
//!
//! Derives `/{locale}{path}` variants for every configured locale unless the
//! page carries its own non-empty alternate map.

use crate::seo::model::{GlobalSeoConfig, PageOverride};
use std::collections::BTreeMap;

pub fn build_alternates(
    global: &GlobalSeoConfig,
    page: Option<&PageOverride>,
    requested: &str,
) -> BTreeMap<String, String> {
    if let Some(explicit) = page
        .and_then(|p| p.locale_alternates.as_ref())
        .filter(|map| !map.is_empty())
    {
        return explicit.clone();
    }

    let suffix = page
        .map(|p| p.slug.as_str())
        .filter(|slug| *slug != "/")
        .or_else(|| Some(requested).filter(|path| *path != "/"))
        .unwrap_or("");

    global
        .locales
        .iter()
        .map(|locale| (locale.clone(), format!("/{locale}{suffix}")))
        .collect()
}
