//! SEO Meta API - per-page metadata resolution service
//!
//! Serves one global SEO document plus per-path overrides, and resolves them
//! into complete head metadata (title, description, canonical, locale
//! alternates, Open Graph, Twitter card, robots) for any requested path.
//!
//! Also renders sitemap.xml / robots.txt from the same document and stores the
//! online-presence widget configuration.

mod auth;
mod config;
mod error;
mod presence;
mod routes;
mod seo;
mod state;
mod store;

use crate::config::Settings;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting SEO Meta API...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    let state = Arc::new(AppState::from_settings(&settings));
    info!(
        "🗂️  SEO document: {} (auth: {})",
        state.seo.location(),
        state.verifier.describe()
    );
    info!("🗂️  Presence config: {}", state.presence.location());

    // Warm the cache; seeds a default document when none exists yet
    let doc = state.seo.load().await;
    info!("✅ SEO document ready: {} page override(s)", doc.pages.len());

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   GET  /api/seo                 - Current SEO document");
    info!("   POST /api/seo                 - Replace SEO document (Bearer)");
    info!("   GET  /api/seo/resolve?path=   - Resolved metadata for a path");
    info!("   GET  /sitemap.xml             - Sitemap");
    info!("   GET  /robots.txt              - Robots file");
    info!("   GET  /api/presence/config     - Online presence config");
    info!("   POST /api/presence/config     - Replace presence config (Bearer)");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seo_meta_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
