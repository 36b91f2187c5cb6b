use tabled::Table;

use crate::{
    cli::spinner,
    error, info,
    management::MusicDataManager,
    success,
    types::TimeRange,
    utils::{
        artist_table_rows, artists_from_page, describe_playback, track_table_rows,
        tracks_from_page,
    },
    warning,
};

pub async fn music() {
    let manager = MusicDataManager::from_env();

    let pb = spinner("Fetching music data...");
    let result = manager.music_data().await;
    pb.finish_and_clear();

    let data = match result {
        Ok(data) => data,
        Err(e) => error!("Cannot fetch music data. Err: {}", e),
    };

    info!("Now: {}", describe_playback(data.currently_playing.as_ref()));

    println!("{}", Table::new(track_table_rows(&data.top_tracks.items)));
    println!("{}", Table::new(artist_table_rows(&data.top_artists.items)));

    success!(
        "{} tracks and {} artists (last updated {})",
        data.top_tracks.items.len(),
        data.top_artists.items.len(),
        data.last_updated.format("%Y-%m-%d %H:%M:%S")
    );
}

pub async fn top_tracks(time_range: TimeRange, limit: u32) {
    let manager = MusicDataManager::from_env();

    let pb = spinner("Fetching top tracks...");
    let result = manager.top_tracks(time_range, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(payload) => {
            let tracks = tracks_from_page(&payload);
            if tracks.is_empty() {
                warning!("No top tracks for {}.", time_range);
                return;
            }
            println!("{}", Table::new(track_table_rows(&tracks)));
        }
        Err(e) => error!("Cannot fetch top tracks. Err: {}", e),
    }
}

pub async fn top_artists(time_range: TimeRange, limit: u32) {
    let manager = MusicDataManager::from_env();

    let pb = spinner("Fetching top artists...");
    let result = manager.top_artists(time_range, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(payload) => {
            let artists = artists_from_page(&payload);
            if artists.is_empty() {
                warning!("No top artists for {}.", time_range);
                return;
            }
            println!("{}", Table::new(artist_table_rows(&artists)));
        }
        Err(e) => error!("Cannot fetch top artists. Err: {}", e),
    }
}
