//! Spotify Listening Data Service Library
//!
//! This library backs the music widget of a personal website. It exchanges a
//! long-lived refresh token for bearer tokens, reads the owner's top tracks,
//! top artists and current playback from the Spotify Web API, keeps the top
//! lists in a time-limited in-process cache, and serves the combined payload
//! over a small HTTP API.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the music endpoints and health checks
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by every layer
//! - `management` - Aggregation cache, clock and the music data facade
//! - `server` - HTTP server bootstrap
//! - `spotify` - Spotify token provider and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use musicfeed::{config, management::MusicDataManager};
//!
//! #[tokio::main]
//! async fn main() -> musicfeed::Res<()> {
//!     config::load_env()?;
//!     let manager = MusicDataManager::from_env();
//!     let data = manager.music_data().await?;
//!     println!("{} top tracks", data.top_tracks.items.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the binary and the CLI layer where any error is reported to the
/// user as-is. Library code returns [`error::Result`] instead so callers can
/// match on the concrete [`error::MusicError`] variant.
///
/// # Example
///
/// ```
/// use musicfeed::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Fetching fresh Spotify data...");
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Spotify data cached successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary and the CLI layer use this macro. Library code reports
/// failures through [`error::MusicError`] and logs them with [`warning!`].
///
/// # Example
///
/// ```
/// error!("Failed to bind server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures, most notably every upstream error before it
/// is handed back to the caller.
///
/// # Example
///
/// ```
/// warning!("Error getting Spotify access token: {}", detail);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
