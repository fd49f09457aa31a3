//! Authorization middleware
//!
//! Rejects write requests without a bearer token before any handler runs.

use crate::error::AppError;
use crate::state::SharedState;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Authenticated subject, inserted into request extensions
#[derive(Debug, Clone)]
pub struct Editor(pub String);

pub async fn require_bearer(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

    let subject = state.verifier.verify(token)?;
    tracing::debug!(editor = %subject, verifier = state.verifier.describe(), "write authorized");

    request.extensions_mut().insert(Editor(subject));

    Ok(next.run(request).await)
}
