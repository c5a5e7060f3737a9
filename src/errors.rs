//! Error types for the Playback SDK
//!
//! This module defines the error taxonomy shared by every component of the SDK.
//! Every failing request ends in exactly one `PlaybackApiError`; session-level
//! operations wrap it in `SdkError`. The CLI folds everything into `AppError`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants::errors as messages;

/// Reason codes returned by the Playback API alongside non-2xx responses
///
/// Parsing is case-insensitive. Codes this client does not know about are kept
/// verbatim in `UnknownError` so newer server releases keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackErrorReason {
    // HTTP 400
    HeaderError,
    BadRequestError,
    SiteNotFound,
    ConfigurationError,
    ApiKeyError,
    MpPartnerError,

    // HTTP 401
    TokenError,
    TooManyDevices,
    TooManyRequests,
    NoEntitlement,
    NoSubscription,
    NoActiveSession,
    NotAuthenticated,

    // HTTP 404
    NoEntityExist,

    /// Unrecognised reason, carrying the raw server string
    UnknownError(String),
}

impl PlaybackErrorReason {
    /// Parse a server-provided reason string
    pub fn from_reason(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "HEADER_ERROR" => Self::HeaderError,
            "BAD_REQUEST_ERROR" => Self::BadRequestError,
            "SITE_NOT_FOUND" => Self::SiteNotFound,
            "CONFIGURATION_ERROR" => Self::ConfigurationError,
            "API_KEY_ERROR" => Self::ApiKeyError,
            "MP_PARTNER_ERROR" => Self::MpPartnerError,
            "TOKEN_ERROR" => Self::TokenError,
            "TOO_MANY_DEVICES" => Self::TooManyDevices,
            "TOO_MANY_REQUESTS" => Self::TooManyRequests,
            "NO_ENTITLEMENT" => Self::NoEntitlement,
            "NO_SUBSCRIPTION" => Self::NoSubscription,
            "NO_ACTIVE_SESSION" => Self::NoActiveSession,
            "NOT_AUTHENTICATED" => Self::NotAuthenticated,
            "NO_ENTITY_EXIST" => Self::NoEntityExist,
            _ => Self::UnknownError(value.to_string()),
        }
    }

    /// Server wire form of the reason, or the raw string for unknown reasons
    pub fn as_str(&self) -> &str {
        match self {
            Self::HeaderError => "HEADER_ERROR",
            Self::BadRequestError => "BAD_REQUEST_ERROR",
            Self::SiteNotFound => "SITE_NOT_FOUND",
            Self::ConfigurationError => "CONFIGURATION_ERROR",
            Self::ApiKeyError => "API_KEY_ERROR",
            Self::MpPartnerError => "MP_PARTNER_ERROR",
            Self::TokenError => "TOKEN_ERROR",
            Self::TooManyDevices => "TOO_MANY_DEVICES",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::NoEntitlement => "NO_ENTITLEMENT",
            Self::NoSubscription => "NO_SUBSCRIPTION",
            Self::NoActiveSession => "NO_ACTIVE_SESSION",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NoEntityExist => "NO_ENTITY_EXIST",
            Self::UnknownError(raw) => raw,
        }
    }
}

impl fmt::Display for PlaybackErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while talking to the Playback API
#[derive(Error, Debug)]
pub enum PlaybackApiError {
    /// Response body could not be decoded into the expected model
    #[error("Invalid response body from the Playback API")]
    InvalidResponsePlaybackData,

    /// Entry URL could not be built from the base URL and entry ID
    #[error("Invalid playback data URL")]
    InvalidPlaybackDataUrl,

    /// Player configuration URL could not be built from the base URL
    #[error("Invalid player information URL")]
    InvalidPlayerInformationUrl,

    /// The session has not been initialized with an API key and license
    #[error("Playback SDK is not initialized. Call initialize() first")]
    InitializationError,

    /// The entry was fetched but carries no playable HLS stream
    #[error("Failed to load HLS stream")]
    LoadHlsStreamError,

    #[error("Unknown playback error")]
    Unknown,

    /// Transport-level failure: no HTTP response was received
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API answered with a non-2xx status
    #[error("API error (HTTP {status_code}): {message} [{reason}]")]
    ApiError {
        status_code: u16,
        message: String,
        reason: PlaybackErrorReason,
    },

    /// A caller-supplied value cannot be sent as an HTTP header
    #[error("Invalid value for header {header}")]
    InvalidHeaderValue { header: &'static str },
}

impl PlaybackApiError {
    /// Build an API error from optional message and reason fields
    pub fn api(status_code: u16, message: Option<String>, reason: Option<String>) -> Self {
        let reason = reason.unwrap_or_else(|| messages::UNKNOWN_REASON.to_string());
        Self::ApiError {
            status_code,
            message: message.unwrap_or_else(|| messages::UNKNOWN_MESSAGE.to_string()),
            reason: PlaybackErrorReason::from_reason(&reason),
        }
    }

    /// API error used when a non-2xx body cannot be decoded at all
    pub fn undecodable_api(status_code: u16) -> Self {
        Self::ApiError {
            status_code,
            message: messages::UNKNOWN_ERROR.to_string(),
            reason: PlaybackErrorReason::from_reason(messages::UNKNOWN_REASON),
        }
    }

    /// Check if retrying the same request could succeed
    ///
    /// Only transport failures qualify. The SDK itself never retries.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    /// The reason code, for API errors
    pub fn reason(&self) -> Option<&PlaybackErrorReason> {
        match self {
            Self::ApiError { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Stable error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidResponsePlaybackData => "INVALID_RESPONSE",
            Self::InvalidPlaybackDataUrl => "INVALID_PLAYBACK_URL",
            Self::InvalidPlayerInformationUrl => "INVALID_PLAYER_URL",
            Self::InitializationError => "NOT_INITIALIZED",
            Self::LoadHlsStreamError => "HLS_LOAD",
            Self::Unknown => "UNKNOWN",
            Self::NetworkError(_) => "NETWORK",
            Self::ApiError { .. } => "API",
            Self::InvalidHeaderValue { .. } => "INVALID_HEADER",
        }
    }
}

/// Session-level errors returned by `PlaybackSession::initialize`
#[derive(Error, Debug)]
pub enum SdkError {
    /// Missing or empty API key
    #[error("Playback SDK initialization failed: an API key is required")]
    InitializationError,

    /// Player configuration was fetched but contained no license
    #[error("Player configuration did not include a license")]
    MissingLicense,

    #[error(transparent)]
    Api(#[from] PlaybackApiError),
}

/// Video player plugin errors
#[derive(Error, Debug)]
pub enum PluginError {
    /// No plugin registered with the plugin manager
    #[error("No video player plugin selected")]
    NoPluginSelected,

    /// The plugin rejected the source descriptor
    #[error("Plugin {plugin} failed to load source: {reason}")]
    LoadFailed { plugin: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    /// Could not locate the user configuration directory
    #[error("Could not determine user config directory")]
    NoConfigDirectory,

    /// I/O error reading or writing configuration
    #[error("Configuration file I/O error: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] PlaybackApiError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Api(e) | AppError::Sdk(SdkError::Api(e)) => e.is_recoverable(),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Api(_) => "api",
            AppError::Sdk(_) => "sdk",
            AppError::Plugin(_) => "plugin",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Playback API result type alias
pub type ApiResult<T> = std::result::Result<T, PlaybackApiError>;

/// Session result type alias
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Plugin result type alias
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
