//! # CLI Module
//!
//! Command implementations behind the `musicfeed` binary. Each command builds
//! its own [`crate::management::MusicDataManager`] from the environment, talks
//! to Spotify through it, and prints the result as tables.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP API used by the website
//! - [`music`] - Prints the aggregated payload the website would receive
//! - [`top_tracks`] / [`top_artists`] - Prints a top list for any window and size
//!
//! ## Usage
//!
//! ```bash
//! musicfeed serve
//! musicfeed music
//! musicfeed top-tracks --time-range long-term --limit 20
//! ```
//!
//! Fatal errors are printed with the `error!` macro, which exits the process.

mod music;
mod serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use music::music;
pub use music::top_artists;
pub use music::top_tracks;
pub use serve::serve;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
