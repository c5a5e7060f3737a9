//! Core HTTP operations
//!
//! Executes `PlaybackRequest` descriptors and hands back the raw status and
//! body. No retry or rate limiting: one request descriptor is exactly one
//! outbound GET.

use reqwest::Client;

use crate::app::client::request::PlaybackRequest;
use crate::app::client::response::RawResponse;
use crate::errors::{ApiResult, PlaybackApiError};

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Creates a new HttpHandler with the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Sends the request and reads the whole body
    ///
    /// # Errors
    ///
    /// Returns `PlaybackApiError::NetworkError` if no response was received
    /// or the body could not be read. HTTP error statuses are not errors at
    /// this layer.
    pub async fn execute(&self, request: &PlaybackRequest) -> ApiResult<RawResponse> {
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self
            .client
            .request(request.method(), request.url().clone())
            .headers(request.headers().clone())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", request.url(), e);
                PlaybackApiError::NetworkError(e)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!(
            "Received HTTP {} ({} bytes) from {}",
            status,
            body.len(),
            request.url()
        );

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
