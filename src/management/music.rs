use serde_json::Value;

use crate::{
    config,
    error::Result,
    info,
    management::cache::{AggregationCache, CacheEntry},
    spotify::{
        SpotifyClient,
        client::{top_artists_endpoint, top_tracks_endpoint},
    },
    success,
    types::{
        ArtistSummary, MusicData, PlaybackState, SpotifyArtist, SpotifyTrack, TimeRange, TopList,
        TrackSummary,
    },
    warning,
};

pub const TOP_TRACKS_LIMIT: u32 = 8;
pub const TOP_ARTISTS_LIMIT: u32 = 6;

/// Entry point of the music widget backend.
///
/// Combines a fresh playback read with the cached (or freshly refreshed) top
/// lists. Each call issues one upstream read for the playback state and, on a
/// cache miss, two more for the top lists, issued concurrently.
pub struct MusicDataManager {
    client: SpotifyClient,
    cache: AggregationCache,
}

impl MusicDataManager {
    pub fn new(client: SpotifyClient, cache: AggregationCache) -> Self {
        MusicDataManager { client, cache }
    }

    /// Builds the manager from the process environment with the system clock.
    pub fn from_env() -> Self {
        Self::new(
            SpotifyClient::from_env(),
            AggregationCache::with_ttl(config::cache_ttl()),
        )
    }

    pub fn cache(&self) -> &AggregationCache {
        &self.cache
    }

    /// Returns top tracks, top artists and the current playback state.
    ///
    /// # Flow
    ///
    /// 1. Read the current playback state (never cached; failures become `None`)
    /// 2. Serve the top lists from the cache if it is fresh (`cached: true`)
    /// 3. Otherwise fetch short-term top tracks (8) and top artists (6)
    ///    concurrently, normalize them and replace the cache entry
    ///    (`cached: false`)
    ///
    /// # Errors
    ///
    /// Any failure while refreshing the top lists is returned unchanged. The
    /// previous cache entry, if any, is left in place.
    pub async fn music_data(&self) -> Result<MusicData> {
        let currently_playing = self.currently_playing().await;

        if let Some(entry) = self.cache.fresh().await {
            info!("Returning cached Spotify data with fresh currently playing");
            return Ok(assemble(entry, currently_playing, true));
        }

        info!("Fetching fresh Spotify data...");
        let entry = match self.refresh().await {
            Ok(entry) => entry,
            Err(e) => {
                warning!("Error fetching Spotify music data: {}", e);
                return Err(e);
            }
        };
        success!("Spotify data cached successfully");

        Ok(assemble(entry, currently_playing, false))
    }

    /// Normalized playback state, or `None` when nothing is playing or the
    /// read failed.
    pub async fn currently_playing(&self) -> Option<PlaybackState> {
        self.client
            .currently_playing()
            .await
            .and_then(PlaybackState::from_payload)
    }

    /// Raw playback payload, passed through for callers that want it as-is.
    pub async fn currently_playing_raw(&self) -> Option<Value> {
        self.client.currently_playing().await
    }

    /// Raw top-tracks page for a caller-chosen window; bypasses the cache.
    pub async fn top_tracks(&self, time_range: TimeRange, limit: u32) -> Result<Value> {
        self.client.top_tracks(time_range, limit).await
    }

    /// Raw top-artists page for a caller-chosen window; bypasses the cache.
    pub async fn top_artists(&self, time_range: TimeRange, limit: u32) -> Result<Value> {
        self.client.top_artists(time_range, limit).await
    }

    async fn refresh(&self) -> Result<CacheEntry> {
        let range = TimeRange::ShortTerm;
        let (tracks, artists) = tokio::try_join!(
            self.client.top_tracks(range, TOP_TRACKS_LIMIT),
            self.client.top_artists(range, TOP_ARTISTS_LIMIT),
        )?;

        let top_tracks = TopList::<TrackSummary>::from_page::<SpotifyTrack>(
            &top_tracks_endpoint(range, TOP_TRACKS_LIMIT),
            tracks,
        )?;
        let top_artists = TopList::<ArtistSummary>::from_page::<SpotifyArtist>(
            &top_artists_endpoint(range, TOP_ARTISTS_LIMIT),
            artists,
        )?;

        Ok(self.cache.replace(top_tracks, top_artists).await)
    }
}

fn assemble(entry: CacheEntry, currently_playing: Option<PlaybackState>, cached: bool) -> MusicData {
    MusicData {
        top_tracks: entry.top_tracks,
        top_artists: entry.top_artists,
        currently_playing,
        cached,
        last_updated: entry.last_updated,
    }
}
