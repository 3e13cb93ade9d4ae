//! # HTTP Server for Senryu Cards
//!
//! Serves rendered cards over a single GET route.
//!
//! ## Usage
//!
//! ```bash
//! senryu serve --listen 0.0.0.0:3000
//! curl 'http://localhost:3000/?first_sentence=a&second_sentence=b&third_sentence=c&author_name=d' > card.png
//! ```
//!
//! Add `format=base64` to receive the PNG as base64 text. Any missing poem
//! field is answered with `400 Missing parameters`.

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::SenryuError;
use state::AppState;

/// Build the application router.
pub fn router(config: ServerConfig) -> Router {
    let app_state = Arc::new(AppState::new(config));

    Router::new()
        .route("/", get(handlers::card::render))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use senryu::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), senryu::SenryuError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:3000".to_string(),
///     ..Default::default()
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), SenryuError> {
    let listen_addr = config.listen_addr.clone();
    let card = config.render.merge_with_defaults();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .map_err(|e| SenryuError::Transport(format!("Failed to bind to {}: {}", listen_addr, e)))?;

    tracing::info!(
        addr = %listen_addr,
        font = %card.font_path,
        "senryu HTTP server listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| SenryuError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
