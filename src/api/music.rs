use std::{future::Future, sync::Arc};

use axum::{
    Extension,
    extract::{Query, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::timeout;

use crate::{
    api::ApiState,
    error::{MusicError, Result},
    types::TimeRange,
};

const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct TopItemsQuery {
    #[serde(default)]
    pub time_range: TimeRange,
    pub limit: Option<u32>,
}

/// `GET /api/spotify/music-data`
pub async fn music_data(Extension(state): Extension<Arc<ApiState>>) -> Response {
    respond(
        &state,
        "Failed to fetch music data",
        state.manager.music_data(),
    )
    .await
}

/// `GET /api/spotify/top-tracks?time_range=&limit=`
pub async fn top_tracks(
    query: std::result::Result<Query<TopItemsQuery>, QueryRejection>,
    Extension(state): Extension<Arc<ApiState>>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return failure(
                StatusCode::BAD_REQUEST,
                "Failed to fetch top tracks",
                &rejection.body_text(),
            );
        }
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    respond(
        &state,
        "Failed to fetch top tracks",
        state.manager.top_tracks(query.time_range, limit),
    )
    .await
}

/// `GET /api/spotify/top-artists?time_range=&limit=`
pub async fn top_artists(
    query: std::result::Result<Query<TopItemsQuery>, QueryRejection>,
    Extension(state): Extension<Arc<ApiState>>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return failure(
                StatusCode::BAD_REQUEST,
                "Failed to fetch top artists",
                &rejection.body_text(),
            );
        }
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    respond(
        &state,
        "Failed to fetch top artists",
        state.manager.top_artists(query.time_range, limit),
    )
    .await
}

/// `GET /api/spotify/currently-playing`
///
/// Answers `data: null` when nothing is playing.
pub async fn currently_playing(Extension(state): Extension<Arc<ApiState>>) -> Response {
    respond(&state, "Failed to fetch currently playing track", async {
        Ok(state.manager.currently_playing_raw().await)
    })
    .await
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Endpoint not found",
        })),
    )
        .into_response()
}

async fn respond<T, F>(state: &ApiState, failure_message: &str, call: F) -> Response
where
    T: Serialize,
    F: Future<Output = Result<T>>,
{
    match timeout(state.request_timeout, call).await {
        Ok(Ok(data)) => success(data),
        Ok(Err(MusicError::Configuration { .. })) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Spotify integration not configured",
            "Missing credentials",
        ),
        Ok(Err(e)) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            failure_message,
            &e.to_string(),
        ),
        Err(_) => failure(
            StatusCode::GATEWAY_TIMEOUT,
            failure_message,
            "Request timed out",
        ),
    }
}

fn success<T: Serialize>(data: T) -> Response {
    Json(json!({
        "success": true,
        "data": data,
        "timestamp": timestamp(),
    }))
    .into_response()
}

fn failure(status: StatusCode, message: &str, error: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "message": message,
            "error": error,
        })),
    )
        .into_response()
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
