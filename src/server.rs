use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;

/// Router serving the built UI from `static_dir`.
///
/// Existing files are served as-is; any other path gets `index.html` so client-side
/// routes survive a reload.
pub fn router(static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let index = static_dir.join("index.html");
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/health", get(health))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

pub async fn serve(config: &Config) -> Result<()> {
    let static_dir = Path::new(&config.static_dir);
    if !static_dir.join("index.html").is_file() {
        warn!(
            "{} has no index.html; every route will return 404",
            static_dir.display()
        );
    }

    let app = router(static_dir);
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Serving {} on http://{}", static_dir.display(), addr);
    axum::serve(listener, app)
        .await
        .context("Static file server stopped")?;

    Ok(())
}
