//! Playback SDK Library
//!
//! A Rust client for the Playback API. Initializes a session from an API key,
//! fetches entry details (concurrently, in input order, for playlists) and
//! turns them into player sources for an externally implemented video player.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
