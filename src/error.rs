use thiserror::Error;

/// Errors produced while talking to Spotify on behalf of the music service.
///
/// None of these are retried. The facade surfaces them to its caller as-is,
/// except for failures while reading the current playback, which are turned
/// into "nothing is playing".
///
/// # Example
///
/// ```rust,ignore
/// match manager.music_data().await {
///     Ok(data) => println!("{} tracks", data.top_tracks.items.len()),
///     Err(MusicError::Configuration { missing }) => eprintln!("set {}", missing.join(", ")),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum MusicError {
    /// One or more credentials are missing or empty.
    ///
    /// Raised before any network request is attempted.
    #[error("Missing Spotify credentials in environment variables: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// The refresh-token exchange was rejected or returned an unusable body.
    #[error("Failed to get Spotify access token: {message}")]
    UpstreamAuth {
        message: String,
        /// Upstream error body when one was returned.
        detail: Option<String>,
    },

    /// A Web API read failed in transport, returned a non-2xx status or an
    /// undecodable body.
    #[error("Failed to fetch data from Spotify: {endpoint}")]
    UpstreamRequest {
        endpoint: String,
        detail: Option<String>,
    },
}

impl MusicError {
    pub fn upstream_request(endpoint: &str, detail: impl Into<String>) -> Self {
        MusicError::UpstreamRequest {
            endpoint: endpoint.to_string(),
            detail: Some(detail.into()),
        }
    }

    /// Upstream diagnostic payload, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            MusicError::Configuration { .. } => None,
            MusicError::UpstreamAuth { detail, .. } | MusicError::UpstreamRequest { detail, .. } => {
                detail.as_deref()
            }
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, MusicError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, MusicError>;
