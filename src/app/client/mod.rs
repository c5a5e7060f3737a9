//! HTTP client implementation for the Playback API
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `request`: request descriptors for the two endpoints
//! - `response`: body decoding and status classification
//! - `http`: request execution over reqwest
//!
//! `PlaybackApi` and `PlayerInformationApi` are the seams the session talks
//! to; `PlaybackApiService` implements both over HTTP.

use async_trait::async_trait;

use crate::app::models::{PlaybackResponse, PlayerInformationResponse};
use crate::app::session::SessionConfiguration;
use crate::errors::ApiResult;

pub mod config;
pub mod http;
pub mod request;
pub mod response;

pub use config::ClientConfig;
pub use request::PlaybackRequest;
pub use response::{classify_entry_response, classify_player_information_response, RawResponse};

use http::HttpHandler;

/// Fetches entry details from the Playback API
#[async_trait]
pub trait PlaybackApi: Send + Sync {
    /// Fetch the metadata record for one entry
    ///
    /// Performs exactly one request and never retries.
    async fn get_video_details(
        &self,
        config: &SessionConfiguration,
        entry_id: &str,
        authorization_token: Option<&str>,
    ) -> ApiResult<PlaybackResponse>;
}

/// Fetches the player configuration (license and integrations)
#[async_trait]
pub trait PlayerInformationApi: Send + Sync {
    async fn get_player_information(
        &self,
        config: &SessionConfiguration,
    ) -> ApiResult<PlayerInformationResponse>;
}

/// HTTP implementation of both Playback API services
#[derive(Debug, Clone)]
pub struct PlaybackApiService {
    http_handler: HttpHandler,
}

impl PlaybackApiService {
    /// Creates a service with a client built from `config`
    ///
    /// # Errors
    ///
    /// Returns `PlaybackApiError::NetworkError` if HTTP client creation fails
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self::with_client(client))
    }

    /// Creates a service around an existing reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http_handler: HttpHandler::new(client),
        }
    }
}

#[async_trait]
impl PlaybackApi for PlaybackApiService {
    async fn get_video_details(
        &self,
        config: &SessionConfiguration,
        entry_id: &str,
        authorization_token: Option<&str>,
    ) -> ApiResult<PlaybackResponse> {
        let request = PlaybackRequest::entry(config, entry_id, authorization_token)?;
        let response = self.http_handler.execute(&request).await?;
        let details = classify_entry_response(&response)?;

        tracing::debug!("Fetched video details for entry {}", entry_id);
        Ok(details)
    }
}

#[async_trait]
impl PlayerInformationApi for PlaybackApiService {
    async fn get_player_information(
        &self,
        config: &SessionConfiguration,
    ) -> ApiResult<PlayerInformationResponse> {
        let request = PlaybackRequest::player_information(config)?;
        let response = self.http_handler.execute(&request).await?;
        classify_player_information_response(&response)
    }
}
