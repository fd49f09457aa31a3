//! SEO document route handlers
//!
//! Read/replace the authoring document and resolve metadata for a path.

use crate::auth::Editor;
use crate::error::{validation_error, ApiResult, AppError};
use crate::seo::{
    build_metadata, resolve_override, structured_data, validate_document, ResolvedMetadata,
    SeoDocument, StructuredData,
};
use crate::state::SharedState;
use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// ==================== Request/Response Types ====================

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Request path, defaults to `/`
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub success: bool,
    pub path: String,
    pub metadata: ResolvedMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<StructuredData>,
}

// ==================== Handlers ====================

/// GET /api/seo
pub async fn get_document(State(state): State<SharedState>) -> Json<SeoDocument> {
    Json(state.seo.load().await)
}

/// POST /api/seo
///
/// Replaces the whole document. The caller is expected to have merged.
pub async fn replace_document(
    State(state): State<SharedState>,
    Extension(editor): Extension<Editor>,
    Json(doc): Json<SeoDocument>,
) -> ApiResult<Json<SeoDocument>> {
    validate_document(&doc).map_err(validation_error)?;

    let dupes = doc.duplicate_slugs();
    if !dupes.is_empty() {
        warn!(
            editor = %editor.0,
            slugs = ?dupes,
            "SEO document has duplicate slugs, only the first of each resolves"
        );
    }

    let saved = state.seo.save(doc).await?;
    info!(
        editor = %editor.0,
        pages = saved.pages.len(),
        "SEO document replaced"
    );

    Ok(Json(saved))
}

/// GET /api/seo/resolve?path=/news
pub async fn resolve_metadata(
    State(state): State<SharedState>,
    Query(query): Query<ResolveQuery>,
) -> ApiResult<Json<ResolveResponse>> {
    let path = query.path.unwrap_or_else(|| "/".to_string());
    if !path.starts_with('/') {
        return Err(AppError::BadRequest(format!(
            "Path '{}' must start with '/'",
            path
        )));
    }

    let doc = state.seo.load().await;
    let metadata = build_metadata(&doc, &path);
    let page = resolve_override(&doc, &path);

    Ok(Json(ResolveResponse {
        success: true,
        metadata,
        schema_type: page.and_then(|p| p.schema_type.clone()),
        structured_data: structured_data(page).cloned(),
        path,
    }))
}
