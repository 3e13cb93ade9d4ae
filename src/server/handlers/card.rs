//! Card rendering handler.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    composer,
    senryu::{Senryu, SenryuParams},
};

use super::super::state::AppState;

/// Query parameters for `GET /`.
#[derive(Debug, Deserialize)]
pub struct CardQuery {
    pub first_sentence: Option<String>,
    pub second_sentence: Option<String>,
    pub third_sentence: Option<String>,
    pub author_name: Option<String>,
    /// `png` (default) or `base64`
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum OutputFormat {
    Png,
    Base64,
}

enum Encoded {
    Png(Vec<u8>),
    Base64(String),
}

/// Handle GET / - render the card as PNG (or base64 PNG text).
pub async fn render(State(state): State<Arc<AppState>>, Query(query): Query<CardQuery>) -> Response {
    let format = match query.format.as_deref() {
        None | Some("png") => OutputFormat::Png,
        Some("base64") => OutputFormat::Base64,
        Some(other) => {
            return (StatusCode::BAD_REQUEST, format!("Unknown format '{}'", other)).into_response();
        }
    };

    let params = SenryuParams {
        first_sentence: query.first_sentence,
        second_sentence: query.second_sentence,
        third_sentence: query.third_sentence,
        author_name: query.author_name,
    };
    let senryu = match Senryu::try_from(params) {
        Ok(senryu) => senryu,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting card request");
            return (StatusCode::BAD_REQUEST, "Missing parameters").into_response();
        }
    };

    // Rasterizing is CPU-bound; keep it off the async workers.
    let config = state.config.render.clone();
    let result = tokio::task::spawn_blocking(move || {
        let canvas = composer::render(&senryu, &config)?;
        match format {
            OutputFormat::Png => canvas.to_png().map(Encoded::Png),
            OutputFormat::Base64 => canvas.to_base64_png().map(Encoded::Base64),
        }
    })
    .await;

    match result {
        Ok(Ok(Encoded::Png(bytes))) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Ok(Ok(Encoded::Base64(text))) => {
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "card render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render card: {}", e),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task error: {}", e),
        )
            .into_response(),
    }
}
