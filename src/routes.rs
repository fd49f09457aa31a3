//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod crawl;
mod presence;
mod seo;

use crate::auth::require_bearer;
use crate::config::Settings;
use crate::state::SharedState;
use axum::{
    handler::Handler,
    http::{header, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Writes require a bearer token before the body is even read
    let auth = from_fn_with_state(state.clone(), require_bearer);

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // SEO document
        .route(
            "/api/seo",
            get(seo::get_document).post(seo::replace_document.layer(auth.clone())),
        )
        .route("/api/seo/resolve", get(seo::resolve_metadata))

        // Crawler files
        .route("/sitemap.xml", get(crawl::sitemap))
        .route("/robots.txt", get(crawl::robots))

        // Online presence
        .route(
            "/api/presence/config",
            get(presence::get_config).post(presence::replace_config.layer(auth)),
        )

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    };

    cors.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Server is running fine.",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{HeaderPresenceVerifier, TokenVerifier};
    use crate::error::AppError;
    use crate::state::AppState;
    use crate::store::{MemoryBackend, StorageBackend};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::io;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct ReadOnlyBackend;

    impl StorageBackend for ReadOnlyBackend {
        fn read(&self) -> io::Result<Option<Vec<u8>>> {
            Ok(Some(b"{}".to_vec()))
        }

        fn write(&self, _bytes: &[u8]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only volume"))
        }

        fn location(&self) -> String {
            "read-only".to_string()
        }
    }

    struct RejectAll;

    impl TokenVerifier for RejectAll {
        fn verify(&self, _token: &str) -> Result<String, AppError> {
            Err(AppError::Unauthorized("Invalid token".to_string()))
        }

        fn describe(&self) -> &'static str {
            "reject-all"
        }
    }

    fn app_with(seo: Arc<dyn StorageBackend>, verifier: Arc<dyn TokenVerifier>) -> Router {
        let state = Arc::new(AppState::new(seo, Arc::new(MemoryBackend::new()), verifier));
        create_router(state, &Settings::default())
    }

    fn app() -> (Router, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (app_with(backend.clone(), Arc::new(HeaderPresenceVerifier)), backend)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn sample_document() -> Value {
        json!({
            "global": {
                "siteName": "Realm",
                "title": "Realm",
                "description": "Global description",
                "canonicalBase": "https://site.example",
                "defaultLocale": "es",
                "locales": ["es", "en"],
                "defaultOgImage": "https://site.example/og.png",
                "twitterHandle": "@realm",
                "robots": { "index": true, "follow": true },
                "sitemapEnabled": true
            },
            "pages": [
                {
                    "slug": "/news",
                    "title": "News",
                    "schemaType": "NewsArticle",
                    "schema": { "@type": "NewsArticle", "headline": "Patch notes" }
                },
                { "slug": "/private", "noindex": true }
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"success\":true"));
    }

    #[tokio::test]
    async fn test_read_returns_default_document() {
        let (app, _) = app();
        let (status, body) = send(&app, get("/api/seo")).await;
        assert_eq!(status, StatusCode::OK);

        let doc: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(doc["pages"], json!([]));
        assert!(doc["global"]["canonicalBase"].is_string());
    }

    #[tokio::test]
    async fn test_write_requires_authorization_header() {
        let (app, backend) = app();
        let (status, body) = send(&app, post_json("/api/seo", &sample_document(), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("UNAUTHORIZED"));
        // rejected before any load or save touched the backend
        assert_eq!(backend.read().unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_rejects_non_bearer_scheme() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/seo")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::from(sample_document().to_string()))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_write_uses_injected_verifier() {
        let app = app_with(Arc::new(MemoryBackend::new()), Arc::new(RejectAll));
        let (status, _) = send(&app, post_json("/api/seo", &sample_document(), Some("tok"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_write_then_read_and_resolve() {
        let (app, _) = app();
        let (status, body) = send(&app, post_json("/api/seo", &sample_document(), Some("tok"))).await;
        assert_eq!(status, StatusCode::OK);
        let saved: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(saved, sample_document());

        let (_, body) = send(&app, get("/api/seo")).await;
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), sample_document());

        let (status, body) = send(&app, get("/api/seo/resolve?path=/news/")).await;
        assert_eq!(status, StatusCode::OK);
        let resolved: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(resolved["metadata"]["title"], "News");
        assert_eq!(resolved["metadata"]["description"], "Global description");
        assert_eq!(resolved["metadata"]["alternates"]["canonical"], "https://site.example/news");
        assert_eq!(resolved["metadata"]["alternates"]["languages"]["en"], "/en/news");
        assert_eq!(resolved["schemaType"], "NewsArticle");
        assert_eq!(resolved["structuredData"]["headline"], "Patch notes");

        let (_, body) = send(&app, get("/api/seo/resolve?path=/private")).await;
        let resolved: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(resolved["metadata"]["robots"]["index"], false);
        assert!(resolved.get("structuredData").is_none());
    }

    #[tokio::test]
    async fn test_resolve_defaults_to_root() {
        let (app, _) = app();
        let (status, body) = send(&app, get("/api/seo/resolve")).await;
        assert_eq!(status, StatusCode::OK);
        let resolved: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(resolved["path"], "/");
    }

    #[tokio::test]
    async fn test_resolve_rejects_relative_path() {
        let (app, _) = app();
        let (status, _) = send(&app, get("/api/seo/resolve?path=news")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_write_validation_error() {
        let (app, backend) = app();
        let mut doc = sample_document();
        doc["global"]["canonicalBase"] = json!("not a url");
        let (status, body) = send(&app, post_json("/api/seo", &doc, Some("tok"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
        assert_eq!(backend.read().unwrap(), None);
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces() {
        let app = app_with(Arc::new(ReadOnlyBackend), Arc::new(HeaderPresenceVerifier));
        let (status, body) = send(&app, post_json("/api/seo", &sample_document(), Some("tok"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("STORAGE_ERROR"));

        // reads still succeed with whatever is stored
        let (status, _) = send(&app, get("/api/seo/resolve?path=/news")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_sitemap_and_robots() {
        let (app, _) = app();
        send(&app, post_json("/api/seo", &sample_document(), Some("tok"))).await;

        let (status, xml) = send(&app, get("/sitemap.xml")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(xml.contains("<loc>https://site.example/news</loc>"));
        assert!(!xml.contains("/private"));

        let (status, txt) = send(&app, get("/robots.txt")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(txt.contains("Sitemap: https://site.example/sitemap.xml"));

        let mut doc = sample_document();
        doc["global"]["sitemapEnabled"] = json!(false);
        send(&app, post_json("/api/seo", &doc, Some("tok"))).await;
        let (status, _) = send(&app, get("/sitemap.xml")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_presence_config_normalized_on_write() {
        let (app, _) = app();
        let body = json!({
            "enabled": true,
            "showCount": true,
            "showList": true,
            "refreshSeconds": 1,
            "listLimit": 999,
            "label": "Adventurers online right now in the realm of everything"
        });

        let (status, _) = send(&app, post_json("/api/presence/config", &body, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, saved) = send(&app, post_json("/api/presence/config", &body, Some("tok"))).await;
        assert_eq!(status, StatusCode::OK);
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["refreshSeconds"], 5);
        assert_eq!(saved["listLimit"], 50);
        assert_eq!(saved["label"].as_str().unwrap().chars().count(), 40);

        let (_, current) = send(&app, get("/api/presence/config")).await;
        assert_eq!(serde_json::from_str::<Value>(&current).unwrap(), saved);
    }

    #[tokio::test]
    async fn test_presence_config_clamps_negative_and_fractional_numbers() {
        let (app, _) = app();
        let body = json!({
            "enabled": false,
            "showList": true,
            "refreshSeconds": -10,
            "listLimit": 12.5,
            "label": "Heroes"
        });

        let (status, saved) = send(&app, post_json("/api/presence/config", &body, Some("tok"))).await;
        assert_eq!(status, StatusCode::OK);
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved["enabled"], false);
        assert_eq!(saved["showList"], true);
        assert_eq!(saved["refreshSeconds"], 5);
        assert_eq!(saved["listLimit"], 13);
        assert_eq!(saved["label"], "Heroes");
    }
}
