//! Configuration management for the music data service.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Spotify credentials are optional at load time: a
//! process without them still starts, and every music request then fails with a
//! configuration error instead of panicking at startup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::spotify::auth::Credentials;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the current working directory first and then in
/// the platform-specific local data directory under `musicfeed/.env`. Values
/// already present in the process environment are never overwritten, and a
/// missing file is not an error.
///
/// # Directory Structure
///
/// The fallback file is looked up in:
/// - Linux: `~/.local/share/musicfeed/.env`
/// - macOS: `~/Library/Application Support/musicfeed/.env`
/// - Windows: `%LOCALAPPDATA%/musicfeed/.env`
///
/// # Errors
///
/// Returns an error string if a `.env` file exists but cannot be parsed.
///
/// # Example
///
/// ```
/// use musicfeed::config;
///
/// if let Err(e) = config::load_env() {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub fn load_env() -> Result<(), String> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| e.to_string())?;
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musicfeed/.env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Returns the address the HTTP server binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:3001`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the long-lived Spotify refresh token, if configured.
///
/// Reads `SPOTIFY_REFRESH_TOKEN`. An empty value counts as missing.
pub fn spotify_refresh_token() -> Option<String> {
    non_empty("SPOTIFY_REFRESH_TOKEN")
}

/// Returns the Spotify API client ID, if configured.
///
/// Reads `SPOTIFY_CLIENT_ID`. An empty value counts as missing.
pub fn spotify_client_id() -> Option<String> {
    non_empty("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify API client secret, if configured.
///
/// Reads `SPOTIFY_CLIENT_SECRET`. An empty value counts as missing.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    non_empty("SPOTIFY_CLIENT_SECRET")
}

/// Collects the three Spotify credentials into a [`Credentials`] value.
///
/// Nothing is validated here; the token provider checks completeness on
/// every call.
pub fn spotify_credentials() -> Credentials {
    Credentials {
        refresh_token: spotify_refresh_token(),
        client_id: spotify_client_id(),
        client_secret: spotify_client_secret(),
    }
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    non_empty("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Returns the Spotify OAuth token endpoint.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, falling back to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    non_empty("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string())
}

/// Whether bearer tokens may be reused until shortly before they expire.
///
/// Reads `SPOTIFY_TOKEN_CACHE` (`true`/`1`/`yes`). Defaults to `false`, in
/// which case a new token is requested for every upstream call.
pub fn spotify_token_cache() -> bool {
    non_empty("SPOTIFY_TOKEN_CACHE")
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns how long aggregated top lists stay fresh.
///
/// Reads `MUSIC_CACHE_TTL_MINUTES`, falling back to 30 minutes.
/// Values that are not positive or too large to represent also fall back to
/// the default.
pub fn cache_ttl() -> chrono::Duration {
    ttl_from_minutes(parse_or("MUSIC_CACHE_TTL_MINUTES", DEFAULT_CACHE_TTL_MINUTES))
}

pub fn ttl_from_minutes(minutes: i64) -> chrono::Duration {
    chrono::Duration::try_minutes(minutes)
        .filter(|d| *d > chrono::Duration::zero())
        .unwrap_or_else(|| chrono::Duration::minutes(DEFAULT_CACHE_TTL_MINUTES))
}

/// Returns the caller-side timeout applied by the HTTP layer.
///
/// Reads `API_REQUEST_TIMEOUT_SECS`, falling back to 10 seconds.
pub fn request_timeout() -> Duration {
    Duration::from_secs(parse_or(
        "API_REQUEST_TIMEOUT_SECS",
        DEFAULT_REQUEST_TIMEOUT_SECS,
    ))
}

/// Returns the origins allowed to call the HTTP API from a browser.
///
/// Reads the comma separated `CORS_ALLOWED_ORIGINS`. An empty list means any
/// origin is allowed.
pub fn cors_allowed_origins() -> Vec<String> {
    non_empty("CORS_ALLOWED_ORIGINS")
        .map(|v| crate::utils::split_list(&v))
        .unwrap_or_default()
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    non_empty(key)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
