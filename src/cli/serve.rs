use std::sync::Arc;

use crate::{config, info, management::MusicDataManager, server::start_api_server, warning};

pub async fn serve() {
    if config::spotify_credentials().client_id.is_none() {
        warning!("Spotify credentials are not configured; music requests will fail.");
    }
    info!(
        "Top lists are cached for {} minutes.",
        config::cache_ttl().num_minutes()
    );

    start_api_server(Arc::new(MusicDataManager::from_env())).await;
}
