use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tabled::Tabled;

use crate::error::{MusicError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Listening window of the Spotify "top items" endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    /// Roughly the last four weeks.
    #[default]
    ShortTerm,
    /// Roughly the last six months.
    MediumTerm,
    /// Several years of data.
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Upstream payloads. Only the fields the service reads are modelled.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    /// `null` for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    /// Absent for podcast episodes.
    #[serde(default)]
    pub album: SpotifyAlbum,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub followers: Followers,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<SpotifyTrack>,
}

// Normalized shapes served to the website.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub name: String,
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: AlbumSummary,
    pub external_urls: ExternalUrls,
    pub preview_url: Option<String>,
}

impl From<SpotifyTrack> for TrackSummary {
    fn from(track: SpotifyTrack) -> Self {
        TrackSummary {
            id: track.id.unwrap_or_default(),
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album: AlbumSummary {
                name: track.album.name,
                images: track.album.images,
            },
            external_urls: track.external_urls,
            preview_url: track.preview_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub images: Vec<Image>,
    pub external_urls: ExternalUrls,
    pub followers: u64,
}

impl From<SpotifyArtist> for ArtistSummary {
    fn from(artist: SpotifyArtist) -> Self {
        ArtistSummary {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            images: artist.images,
            external_urls: artist.external_urls,
            followers: artist.followers.total,
        }
    }
}

/// An ordered list as served under `topTracks` / `topArtists`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopList<T> {
    pub items: Vec<T>,
}

impl<T> TopList<T> {
    pub fn new(items: Vec<T>) -> Self {
        TopList { items }
    }

    /// Decodes a raw Spotify paging object and normalizes every item.
    ///
    /// A payload that does not decode is reported as a failed request for
    /// `endpoint`.
    pub fn from_page<R>(endpoint: &str, payload: Value) -> Result<Self>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let page: Paging<R> = serde_json::from_value(payload)
            .map_err(|e| MusicError::upstream_request(endpoint, e.to_string()))?;

        Ok(TopList {
            items: page.items.into_iter().map(T::from).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub track: Option<TrackSummary>,
}

impl From<CurrentlyPlayingResponse> for PlaybackState {
    fn from(res: CurrentlyPlayingResponse) -> Self {
        PlaybackState {
            is_playing: res.is_playing,
            track: res.item.map(TrackSummary::from),
        }
    }
}

impl PlaybackState {
    /// Normalizes a raw "currently playing" payload. Anything that does not
    /// decode counts as nothing playing.
    pub fn from_payload(payload: Value) -> Option<Self> {
        serde_json::from_value::<CurrentlyPlayingResponse>(payload)
            .ok()
            .map(PlaybackState::from)
    }
}

/// Combined payload returned by the music data facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicData {
    pub top_tracks: TopList<TrackSummary>,
    pub top_artists: TopList<ArtistSummary>,
    pub currently_playing: Option<PlaybackState>,
    pub cached: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub rank: usize,
    pub name: String,
    pub genres: String,
    pub followers: u64,
}
