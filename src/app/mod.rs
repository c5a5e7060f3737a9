//! Core SDK logic
//!
//! This module contains the HTTP client for the Playback API, the data
//! models, the ordered multi-entry aggregator, player source construction,
//! the plugin registry and the session that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use playback_sdk::app::{ClientConfig, PlaybackSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = PlaybackSession::new(&ClientConfig::default())?;
//! session.initialize("api-key", None, None).await?;
//!
//! let result = session.load_all_hls_streams(&["0_a", "0_b", "0_c"], None).await?;
//! for entry in &result.successes {
//!     println!("{}: {:?}", entry.entry_id, entry.details.hls_url());
//! }
//! for failure in &result.failures {
//!     eprintln!("{} failed: {}", failure.entry_id, failure.error);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod client;
pub mod models;
pub mod player;
pub mod plugin;
pub mod session;

// Re-export main public API
pub use aggregator::{AggregateResult, EntryFailure, LoadedEntry, PlaylistAggregator};
pub use client::{
    ClientConfig, PlaybackApi, PlaybackApiService, PlaybackRequest, PlayerInformationApi,
    RawResponse,
};
pub use models::{
    Advert, CoverImageTier, CoverImages, Media, PlaybackResponse, PlayerInformationResponse,
    StreamFormat,
};
pub use player::{PlaybackConfig, PlayerSource, SourceConfig, VideoPlayerConfig};
pub use plugin::{PluginManager, VideoPlayerPlugin};
pub use session::{PlaybackSession, PlaylistLoad, SessionConfiguration, SessionState};
