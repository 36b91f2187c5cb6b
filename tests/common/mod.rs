#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Extension, Form, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use musicfeed::{
    management::{AggregationCache, Clock, MusicDataManager},
    spotify::{Credentials, SpotifyClient, TokenProvider},
};
use serde_json::{Value, json};

pub const ACCESS_TOKEN: &str = "test-access-token";

/// Call counters and failure switches of the fake Spotify services.
#[derive(Default)]
pub struct Upstream {
    pub token_calls: AtomicUsize,
    pub top_tracks_calls: AtomicUsize,
    pub top_artists_calls: AtomicUsize,
    pub currently_playing_calls: AtomicUsize,

    pub fail_token: AtomicBool,
    pub omit_access_token: AtomicBool,
    pub fail_top_tracks: AtomicBool,
    pub fail_top_artists: AtomicBool,
    pub nothing_playing: AtomicBool,
    pub top_tracks_delay_ms: AtomicU64,

    pub last_token_form: Mutex<Option<HashMap<String, String>>>,
    pub last_top_query: Mutex<Option<HashMap<String, String>>>,
}

impl Upstream {
    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn top_tracks_calls(&self) -> usize {
        self.top_tracks_calls.load(Ordering::SeqCst)
    }

    pub fn top_artists_calls(&self) -> usize {
        self.top_artists_calls.load(Ordering::SeqCst)
    }

    pub fn currently_playing_calls(&self) -> usize {
        self.currently_playing_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.token_calls()
            + self.top_tracks_calls()
            + self.top_artists_calls()
            + self.currently_playing_calls()
    }

    pub fn set(&self, switch: &AtomicBool, value: bool) {
        switch.store(value, Ordering::SeqCst);
    }
}

/// Local axum server standing in for the accounts service and the Web API.
pub struct MockSpotify {
    pub addr: SocketAddr,
    pub upstream: Arc<Upstream>,
}

impl MockSpotify {
    pub async fn start() -> Self {
        let upstream = Arc::new(Upstream::default());

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/top/tracks", get(top_tracks))
            .route("/v1/me/top/artists", get(top_artists))
            .route("/v1/me/player/currently-playing", get(currently_playing))
            .layer(Extension(Arc::clone(&upstream)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockSpotify { addr, upstream }
    }

    pub fn api_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn token_url(&self) -> String {
        format!("http://{}/api/token", self.addr)
    }

    pub fn token_provider(&self, credentials: Credentials) -> TokenProvider {
        TokenProvider::new(reqwest::Client::new(), self.token_url(), credentials)
    }

    pub fn client(&self, credentials: Credentials) -> SpotifyClient {
        SpotifyClient::new(
            reqwest::Client::new(),
            self.api_url(),
            self.token_provider(credentials),
        )
    }

    pub fn manager(&self, credentials: Credentials, clock: Arc<ManualClock>) -> MusicDataManager {
        MusicDataManager::new(
            self.client(credentials),
            AggregationCache::new(chrono::Duration::minutes(30), clock),
        )
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("refresh-token", "client-id", "client-secret")
}

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Arc<Self> {
        Arc::new(ManualClock(Mutex::new(start)))
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "artists": [{ "id": "ar1", "name": "First Artist" }, { "id": "ar2", "name": "Second Artist" }],
        "album": {
            "name": format!("Album {}", id),
            "images": [
                { "url": format!("https://i.scdn.co/image/{}-640", id), "height": 640, "width": 640 },
                { "url": format!("https://i.scdn.co/image/{}-64", id), "height": 64, "width": 64 }
            ]
        },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{}", id) },
        "preview_url": null,
        "popularity": 50
    })
}

pub fn artist_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Artist {}", id),
        "genres": ["indie", "shoegaze"],
        "images": [{ "url": format!("https://i.scdn.co/image/{}", id), "height": 320, "width": 320 }],
        "external_urls": { "spotify": format!("https://open.spotify.com/artist/{}", id) },
        "followers": { "href": null, "total": 1234 }
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN))
}

fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": { "status": status.as_u16(), "message": message } })),
    )
        .into_response()
}

fn limit_of(query: &HashMap<String, String>) -> usize {
    query
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(20)
}

async fn token(
    Extension(upstream): Extension<Arc<Upstream>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    upstream.token_calls.fetch_add(1, Ordering::SeqCst);
    *upstream.last_token_form.lock().unwrap() = Some(form);

    if upstream.fail_token.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Refresh token revoked" })),
        )
            .into_response();
    }

    if upstream.omit_access_token.load(Ordering::SeqCst) {
        return Json(json!({ "token_type": "Bearer", "expires_in": 3600 })).into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": "user-top-read user-read-currently-playing"
    }))
    .into_response()
}

async fn top_tracks(
    Extension(upstream): Extension<Arc<Upstream>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    upstream.top_tracks_calls.fetch_add(1, Ordering::SeqCst);

    let delay = upstream.top_tracks_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    if !authorized(&headers) {
        return api_error(StatusCode::UNAUTHORIZED, "Invalid access token");
    }
    if upstream.fail_top_tracks.load(Ordering::SeqCst) {
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
    }

    let items: Vec<Value> = (1..=limit_of(&query))
        .map(|i| track_json(&format!("t{}", i)))
        .collect();
    *upstream.last_top_query.lock().unwrap() = Some(query);

    Json(json!({ "items": items, "total": 50, "limit": items.len() })).into_response()
}

async fn top_artists(
    Extension(upstream): Extension<Arc<Upstream>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    upstream.top_artists_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return api_error(StatusCode::UNAUTHORIZED, "Invalid access token");
    }
    if upstream.fail_top_artists.load(Ordering::SeqCst) {
        return api_error(StatusCode::BAD_GATEWAY, "Bad gateway");
    }

    let items: Vec<Value> = (1..=limit_of(&query))
        .map(|i| artist_json(&format!("a{}", i)))
        .collect();
    *upstream.last_top_query.lock().unwrap() = Some(query);

    Json(json!({ "items": items, "total": 50, "limit": items.len() })).into_response()
}

async fn currently_playing(
    Extension(upstream): Extension<Arc<Upstream>>,
    headers: HeaderMap,
) -> Response {
    upstream.currently_playing_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return api_error(StatusCode::UNAUTHORIZED, "Invalid access token");
    }
    if upstream.nothing_playing.load(Ordering::SeqCst) {
        return StatusCode::NO_CONTENT.into_response();
    }

    Json(json!({
        "is_playing": true,
        "progress_ms": 42000,
        "currently_playing_type": "track",
        "item": track_json("t1")
    }))
    .into_response()
}
