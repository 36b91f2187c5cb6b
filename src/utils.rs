use crate::types::{
    ArtistSummary, ArtistTableRow, PlaybackState, SpotifyArtist, SpotifyTrack, TrackSummary,
    TrackTableRow,
};

/// Splits a comma separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn track_table_rows(tracks: &[TrackSummary]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artists: t.artists.join(", "),
            album: t.album.name.clone(),
        })
        .collect()
}

pub fn artist_table_rows(artists: &[ArtistSummary]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            genres: a.genres.join(", "),
            followers: a.followers,
        })
        .collect()
}

/// Decodes a raw top-tracks page for display; undecodable items are skipped.
pub fn tracks_from_page(payload: &serde_json::Value) -> Vec<TrackSummary> {
    items_from_page::<SpotifyTrack>(payload)
        .into_iter()
        .map(TrackSummary::from)
        .collect()
}

/// Decodes a raw top-artists page for display; undecodable items are skipped.
pub fn artists_from_page(payload: &serde_json::Value) -> Vec<ArtistSummary> {
    items_from_page::<SpotifyArtist>(payload)
        .into_iter()
        .map(ArtistSummary::from)
        .collect()
}

fn items_from_page<T: serde::de::DeserializeOwned>(payload: &serde_json::Value) -> Vec<T> {
    payload["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| serde_json::from_value(i.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// One-line description of the playback state, e.g. `Song by A, B (playing)`.
pub fn describe_playback(state: Option<&PlaybackState>) -> String {
    match state.and_then(|s| s.track.as_ref().map(|t| (s.is_playing, t))) {
        Some((is_playing, track)) => format!(
            "{} by {} ({})",
            track.name,
            track.artists.join(", "),
            if is_playing { "playing" } else { "paused" }
        ),
        None => "Nothing playing".to_string(),
    }
}
