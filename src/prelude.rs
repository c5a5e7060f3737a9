//! Prelude module for the Playback SDK
//!
//! Re-exports the most commonly used items, so typical usage needs a single
//! `use playback_sdk::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use playback_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let session = PlaybackSession::new(&ClientConfig::default())?;
//!     session.initialize("api-key", None, None).await?;
//!
//!     let source = session.load_player("0_abc", None).await?;
//!     if let Some(initial) = source.initial_source() {
//!         println!("Playing {}", initial.url);
//!     }
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{
    AppError, PlaybackApiError, PlaybackErrorReason, PluginError, Result, SdkError,
};

// Session and the types its operations return
pub use crate::app::{
    AggregateResult, ClientConfig, EntryFailure, LoadedEntry, PlaybackResponse, PlaybackSession,
    PlayerSource, PlaylistLoad, SessionConfiguration, SourceConfig, VideoPlayerConfig,
};

// Player integration
pub use crate::app::{PluginManager, VideoPlayerPlugin};

// Service seams for alternative transports and test doubles
pub use crate::app::{PlaybackApi, PlayerInformationApi};

pub use crate::constants::DEFAULT_BASE_URL;

pub use std::sync::Arc;

// Common external crate re-exports for convenience
pub use tokio;
