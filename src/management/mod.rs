mod cache;
mod clock;
mod music;

pub use cache::AggregationCache;
pub use cache::CacheEntry;
pub use clock::Clock;
pub use clock::SystemClock;
pub use music::MusicDataManager;
pub use music::TOP_ARTISTS_LIMIT;
pub use music::TOP_TRACKS_LIMIT;
