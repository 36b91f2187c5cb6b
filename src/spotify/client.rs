use reqwest::Client;
use serde_json::Value;

use crate::{
    config,
    error::{MusicError, Result},
    spotify::auth::TokenProvider,
    types::TimeRange,
    warning,
};

pub const CURRENTLY_PLAYING_ENDPOINT: &str = "/me/player/currently-playing";

pub fn top_tracks_endpoint(time_range: TimeRange, limit: u32) -> String {
    format!("/me/top/tracks?time_range={time_range}&limit={limit}")
}

pub fn top_artists_endpoint(time_range: TimeRange, limit: u32) -> String {
    format!("/me/top/artists?time_range={time_range}&limit={limit}")
}

/// Authenticated reader for the Spotify Web API.
///
/// Every request asks the [`TokenProvider`] for a bearer token first and then
/// issues a single GET against `base_url + endpoint`. There are no retries and
/// no client-side timeout; the HTTP layer applies its own.
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    tokens: TokenProvider,
}

impl SpotifyClient {
    pub fn new(http: Client, base_url: impl Into<String>, tokens: TokenProvider) -> Self {
        let base_url: String = base_url.into();
        SpotifyClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Builds a client from the process environment.
    ///
    /// # Example
    ///
    /// ```
    /// let client = SpotifyClient::from_env();
    /// let tracks = client.top_tracks(TimeRange::MediumTerm, 20).await?;
    /// ```
    pub fn from_env() -> Self {
        let http = Client::new();
        let tokens = TokenProvider::from_env(http.clone());
        Self::new(http, config::spotify_apiurl(), tokens)
    }

    /// Issues an authenticated GET and returns the decoded JSON body unchanged.
    ///
    /// # Errors
    ///
    /// - Token failures are passed through as-is
    ///   ([`MusicError::Configuration`], [`MusicError::UpstreamAuth`])
    /// - Transport errors, non-2xx statuses and bodies that are not JSON
    ///   (including the empty `204 No Content`) become
    ///   [`MusicError::UpstreamRequest`]
    pub async fn request(&self, endpoint: &str) -> Result<Value> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| request_error(endpoint, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| request_error(endpoint, e.to_string()))?;

        if !status.is_success() {
            return Err(request_error(endpoint, format!("{}: {}", status, body)));
        }

        serde_json::from_str(&body).map_err(|e| request_error(endpoint, e.to_string()))
    }

    /// Raw `/me/top/tracks` page for the given window.
    pub async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Value> {
        self.request(&top_tracks_endpoint(time_range, limit)).await
    }

    /// Raw `/me/top/artists` page for the given window.
    pub async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Value> {
        self.request(&top_artists_endpoint(time_range, limit)).await
    }

    /// Raw playback payload, or `None` if the request failed for any reason.
    ///
    /// Spotify answers `204 No Content` when nothing is playing, which shows
    /// up here as a failed request. That is the common case, so it is not
    /// treated as an error.
    pub async fn currently_playing(&self) -> Option<Value> {
        self.request(CURRENTLY_PLAYING_ENDPOINT).await.ok()
    }
}

fn request_error(endpoint: &str, detail: String) -> MusicError {
    warning!(
        "Error making Spotify API request to {}: {}",
        endpoint,
        detail
    );
    MusicError::upstream_request(endpoint, detail)
}
