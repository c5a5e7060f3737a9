//! Application constants for the Playback SDK
//!
//! This module centralizes the constants used throughout the SDK,
//! organized by functional domain.

use std::time::Duration;

/// Playback API endpoints
pub mod api {
    /// Default production base URL, overridable at initialize time
    pub const DEFAULT_BASE_URL: &str = "https://api.playback.streamamg.com/v1";

    /// Path segment of the player configuration endpoint
    pub const PLAYER_PATH: &str = "player";

    /// Path segment of the entry detail endpoint
    pub const ENTRY_PATH: &str = "entry";
}

/// Header names and values sent with every request
pub mod headers {
    /// API key header
    pub const API_KEY: &str = "x-api-key";

    /// Accepted response content type
    pub const ACCEPT_JSON: &str = "application/json";

    /// Authorization scheme prefix for entry requests
    pub const BEARER_PREFIX: &str = "Bearer ";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent, replaced per request when the session has an override
    pub const USER_AGENT: &str = concat!("PlaybackSDK-rs/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 16;
}

/// Environment variable names
pub mod env {
    /// API key used by the CLI when `--api-key` is not given
    pub const API_KEY: &str = "PLAYBACK_API_KEY";

    /// Base URL override used by the CLI
    pub const BASE_URL: &str = "PLAYBACK_BASE_URL";
}

/// Fallback texts for API errors without a usable body
pub mod errors {
    /// Message used when a decodable error body has no `message`
    pub const UNKNOWN_MESSAGE: &str = "Unknown authentication error message";

    /// Reason used when an error body has no `reason` or cannot be decoded
    pub const UNKNOWN_REASON: &str = "Unknown authentication error reason";

    /// Message used when an error body cannot be decoded
    pub const UNKNOWN_ERROR: &str = "Unknown authentication error";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file
    pub const LOCAL_FILE: &str = "playback-sdk.toml";

    /// Directory under the user config dir
    pub const APP_DIR: &str = "playback-sdk";

    /// File name under the user config dir
    pub const FILE_NAME: &str = "config.toml";
}

/// Logging defaults
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

pub use api::DEFAULT_BASE_URL;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
