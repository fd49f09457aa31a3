//! Crawler-facing files: sitemap.xml and robots.txt

use crate::error::{ApiResult, AppError};
use crate::seo::{build_robots_txt, build_sitemap};
use crate::state::SharedState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<SharedState>) -> ApiResult<impl IntoResponse> {
    let doc = state.seo.load().await;
    let sitemap = build_sitemap(&doc)
        .ok_or_else(|| AppError::NotFound("Sitemap is disabled".to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap.into_xml(),
    ))
}

/// GET /robots.txt
pub async fn robots(State(state): State<SharedState>) -> impl IntoResponse {
    let doc = state.seo.load().await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        build_robots_txt(&doc.global),
    )
}
