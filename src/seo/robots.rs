//! Robots directives
//!
//! Merges global crawl policy with page opt-outs, and renders robots.txt.

use crate::seo::model::{GlobalSeoConfig, PageOverride, RobotsDirectives};

/// Combine global directives with a page's `noindex`/`nofollow` flags.
///
/// An unset flag inherits the global value; an explicit flag wins. The
/// crawler extension block always comes from the global policy.
pub fn merge_robots(global: &RobotsDirectives, page: Option<&PageOverride>) -> RobotsDirectives {
    let noindex = page.and_then(|p| p.noindex);
    let nofollow = page.and_then(|p| p.nofollow);

    RobotsDirectives {
        index: noindex.map_or(global.index, |flag| !flag),
        follow: nofollow.map_or(global.follow, |flag| !flag),
        google_bot: global.google_bot.clone(),
    }
}

/// robots.txt body: the stored text when present, otherwise generated
pub fn build_robots_txt(global: &GlobalSeoConfig) -> String {
    if let Some(raw) = global.robots_txt.as_deref().filter(|raw| !raw.trim().is_empty()) {
        return raw.to_string();
    }

    let mut out = String::from("User-agent: *\n");
    if global.robots.index {
        out.push_str("Allow: /\n");
    } else {
        out.push_str("Disallow: /\n");
    }

    if global.sitemap_enabled {
        out.push_str(&format!(
            "\nSitemap: {}/sitemap.xml\n",
            global.canonical_base.trim_end_matches('/')
        ));
    }

    out
}
