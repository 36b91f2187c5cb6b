mod common;

use std::{sync::Arc, sync::atomic::Ordering, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::Utc;
use common::{ManualClock, MockSpotify, credentials};
use musicfeed::{
    api::{ApiState, router},
    spotify::Credentials,
};
use serde_json::Value;
use tower::ServiceExt;

fn app(mock: &MockSpotify, creds: Credentials, request_timeout: Duration) -> Router {
    let state = Arc::new(ApiState {
        manager: Arc::new(mock.manager(creds, ManualClock::new(Utc::now()))),
        request_timeout,
    });
    router(state, &[])
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let mock = MockSpotify::start().await;
    let (status, body) = get(app(&mock, credentials(), Duration::from_secs(5)), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "musicfeed");
}

#[tokio::test]
async fn test_music_data_envelope() {
    let mock = MockSpotify::start().await;
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_secs(5)),
        "/api/spotify/music-data",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["timestamp"].is_string());

    let data = &body["data"];
    assert_eq!(data["cached"], false);
    assert_eq!(data["topTracks"]["items"].as_array().unwrap().len(), 8);
    assert_eq!(data["topArtists"]["items"].as_array().unwrap().len(), 6);
    assert_eq!(data["currentlyPlaying"]["is_playing"], true);
    assert_eq!(data["currentlyPlaying"]["track"]["id"], "t1");
    assert!(data["lastUpdated"].is_i64());
}

#[tokio::test]
async fn test_music_data_without_credentials() {
    let mock = MockSpotify::start().await;
    let (status, body) = get(
        app(&mock, Credentials::default(), Duration::from_secs(5)),
        "/api/spotify/music-data",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Spotify integration not configured");
    assert_eq!(body["error"], "Missing credentials");
    assert_eq!(mock.upstream.network_calls(), 0);
}

#[tokio::test]
async fn test_music_data_upstream_failure() {
    let mock = MockSpotify::start().await;
    mock.upstream.set(&mock.upstream.fail_top_tracks, true);
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_secs(5)),
        "/api/spotify/music-data",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch music data");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("/me/top/tracks")
    );
}

#[tokio::test]
async fn test_music_data_times_out() {
    let mock = MockSpotify::start().await;
    mock.upstream
        .top_tracks_delay_ms
        .store(2_000, Ordering::SeqCst);
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_millis(100)),
        "/api/spotify/music-data",
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Request timed out");
}

#[tokio::test]
async fn test_top_tracks_pass_through() {
    let mock = MockSpotify::start().await;
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_secs(5)),
        "/api/spotify/top-tracks?time_range=medium_term&limit=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    // raw payload, not normalized
    assert_eq!(items[0]["artists"][0]["name"], "First Artist");
    assert_eq!(items[0]["popularity"], 50);

    let query = mock.upstream.last_top_query.lock().unwrap().clone().unwrap();
    assert_eq!(query["time_range"], "medium_term");
}

#[tokio::test]
async fn test_top_artists_defaults() {
    let mock = MockSpotify::start().await;
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_secs(5)),
        "/api/spotify/top-artists",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 10);
    let query = mock.upstream.last_top_query.lock().unwrap().clone().unwrap();
    assert_eq!(query["time_range"], "short_term");
}

#[tokio::test]
async fn test_currently_playing_nothing() {
    let mock = MockSpotify::start().await;
    mock.upstream.set(&mock.upstream.nothing_playing, true);
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_secs(5)),
        "/api/spotify/currently-playing",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_unknown_route() {
    let mock = MockSpotify::start().await;
    let (status, body) = get(
        app(&mock, credentials(), Duration::from_secs(5)),
        "/api/buttons",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Endpoint not found");
}

#[tokio::test]
async fn test_top_items_reject_bad_query_with_envelope() {
    let mock = MockSpotify::start().await;

    for (uri, message) in [
        ("/api/spotify/top-tracks?time_range=bogus", "Failed to fetch top tracks"),
        ("/api/spotify/top-artists?time_range=bogus", "Failed to fetch top artists"),
        ("/api/spotify/top-tracks?limit=abc", "Failed to fetch top tracks"),
    ] {
        let (status, body) = get(app(&mock, credentials(), Duration::from_secs(5)), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], message);
        assert!(body["error"].as_str().unwrap().contains("query string"));
    }

    assert_eq!(mock.upstream.network_calls(), 0);
}
