//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It is split along the
//! two upstream services the music data service depends on:
//!
//! ```text
//! Management Layer (MusicDataManager)
//!          ↓
//! Spotify Integration Layer
//!     ├── client (Web API reads: top tracks, top artists, currently playing)
//!     └── auth   (refresh-token grant against the accounts service)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`auth::TokenProvider`] exchanges the configured refresh token, client ID
//! and client secret for a bearer token using the standard OAuth 2.0
//! `refresh_token` grant. Missing credentials are detected before any request
//! is sent. Token reuse is opt-in; by default each Web API call obtains a new
//! token.
//!
//! ## Web API
//!
//! [`client::SpotifyClient`] issues authenticated GET requests and hands back
//! the decoded JSON untouched. Normalization into the website's shapes happens
//! in [`crate::types`] and [`crate::management`].
//!
//! ### Endpoints
//! - `GET /me/top/tracks?time_range=&limit=`
//! - `GET /me/top/artists?time_range=&limit=`
//! - `GET /me/player/currently-playing`
//! - `POST /api/token` (accounts service)
//!
//! ## Error Types
//!
//! All fallible functions return [`crate::error::Result`]. Nothing in this
//! module retries; the one failure that is swallowed is the playback read,
//! which reports `None` instead.

pub mod auth;
pub mod client;

pub use auth::{Credentials, TokenProvider};
pub use client::SpotifyClient;
