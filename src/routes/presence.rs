//! Online presence configuration handlers

use crate::auth::Editor;
use crate::error::ApiResult;
use crate::presence::PresenceConfig;
use crate::state::SharedState;
use axum::{
    extract::{Extension, State},
    Json,
};

/// GET /api/presence/config
pub async fn get_config(State(state): State<SharedState>) -> Json<PresenceConfig> {
    Json(state.presence.load().await)
}

/// POST /api/presence/config
pub async fn replace_config(
    State(state): State<SharedState>,
    Extension(editor): Extension<Editor>,
    Json(config): Json<PresenceConfig>,
) -> ApiResult<Json<PresenceConfig>> {
    let saved = state.presence.save(config).await?;
    tracing::info!(editor = %editor.0, enabled = saved.enabled, "Presence config replaced");
    Ok(Json(saved))
}
