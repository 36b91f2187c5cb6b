use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    api::{self, ApiState},
    config, error, info,
    management::MusicDataManager,
};

/// Binds `SERVER_ADDRESS` and serves the API until the process is stopped.
pub async fn start_api_server(manager: Arc<MusicDataManager>) {
    let state = Arc::new(ApiState {
        manager,
        request_timeout: config::request_timeout(),
    });
    let app = api::router(state, &config::cors_allowed_origins());

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("Music data server running on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
    }
}
