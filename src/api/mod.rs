//! # API Module
//!
//! HTTP endpoints consumed by the website's music widget. Handlers wrap every
//! core call in a caller-side timeout and answer with a uniform JSON envelope:
//!
//! ```text
//! { "success": true,  "data": ..., "timestamp": "2025-01-01T00:00:00.000Z" }
//! { "success": false, "message": "...", "error": "..." }
//! ```
//!
//! ## Endpoints
//!
//! - `GET /health` - liveness and version information
//! - `GET /api/spotify/music-data` - top tracks, top artists and playback, see
//!   [`crate::management::MusicDataManager::music_data`]
//! - `GET /api/spotify/top-tracks` - raw pass-through with `time_range` and `limit`
//! - `GET /api/spotify/top-artists` - raw pass-through with `time_range` and `limit`
//! - `GET /api/spotify/currently-playing` - raw playback payload or `null`
//!
//! Anything else gets a JSON 404.

mod health;
mod music;

use std::{sync::Arc, time::Duration};

use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::management::MusicDataManager;

pub use health::health;
pub use music::{
    TopItemsQuery, currently_playing, music_data, not_found, top_artists, top_tracks,
};

/// Shared state handed to every handler.
pub struct ApiState {
    pub manager: Arc<MusicDataManager>,
    pub request_timeout: Duration,
}

/// Builds the application router.
///
/// `allowed_origins` restricts browser access; an empty slice allows any
/// origin.
pub fn router(state: Arc<ApiState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/spotify/music-data", get(music_data))
        .route("/api/spotify/top-tracks", get(top_tracks))
        .route("/api/spotify/top-artists", get(top_artists))
        .route("/api/spotify/currently-playing", get(currently_playing))
        .fallback(not_found)
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_credentials(true)
}
