//! Response decoding and status classification
//!
//! Every Playback API response is classified three ways:
//! - 2xx: decode the expected model, or fail with `InvalidResponsePlaybackData`
//! - non-2xx: recover `message` / `reason` from the error envelope into `ApiError`
//! - no response at all: `NetworkError`, produced by the HTTP handler

use serde::de::DeserializeOwned;

use crate::app::models::{ErrorEnvelope, PlaybackResponse, PlayerInformationResponse};
use crate::errors::{ApiResult, PlaybackApiError};

/// Status code and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Classify a response from `GET /entry/{id}`
///
/// Error bodies are decoded with the entry model itself, since the API sends
/// them in the same envelope.
pub fn classify_entry_response(response: &RawResponse) -> ApiResult<PlaybackResponse> {
    if response.is_success() {
        return decode_success(&response.body);
    }

    match serde_json::from_slice::<PlaybackResponse>(&response.body) {
        Ok(envelope) => Err(PlaybackApiError::api(
            response.status,
            envelope.message,
            envelope.reason,
        )),
        Err(e) => {
            tracing::debug!("Undecodable error body (HTTP {}): {}", response.status, e);
            Err(PlaybackApiError::undecodable_api(response.status))
        }
    }
}

/// Classify a response from `GET /player`
pub fn classify_player_information_response(
    response: &RawResponse,
) -> ApiResult<PlayerInformationResponse> {
    if response.is_success() {
        return decode_success(&response.body);
    }

    match serde_json::from_slice::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => Err(PlaybackApiError::api(
            response.status,
            envelope.message,
            envelope.reason,
        )),
        Err(e) => {
            tracing::debug!("Undecodable error body (HTTP {}): {}", response.status, e);
            Err(PlaybackApiError::undecodable_api(response.status))
        }
    }
}

fn decode_success<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Failed to decode Playback API response: {}", e);
        PlaybackApiError::InvalidResponsePlaybackData
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlaybackErrorReason;

    fn assert_api_error(
        result: ApiResult<impl std::fmt::Debug>,
        expected_status: u16,
        expected_message: &str,
        expected_reason: PlaybackErrorReason,
    ) {
        match result {
            Err(PlaybackApiError::ApiError {
                status_code,
                message,
                reason,
            }) => {
                assert_eq!(status_code, expected_status);
                assert_eq!(message, expected_message);
                assert_eq!(reason, expected_reason);
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_success_decodes_entry() {
        let response = RawResponse::new(
            200,
            r#"{"id":"0_abc","name":"Clip","media":{"hls":"https://cdn.example.com/a.m3u8"}}"#,
        );
        let entry = classify_entry_response(&response).unwrap();
        assert_eq!(entry.name.as_deref(), Some("Clip"));
        assert_eq!(entry.hls_url(), Some("https://cdn.example.com/a.m3u8"));
    }

    #[test]
    fn test_success_with_invalid_body() {
        for body in ["", "<html>oops</html>", r#"{"playFrom":"soon"}"#] {
            let response = RawResponse::new(200, body);
            assert!(
                matches!(
                    classify_entry_response(&response),
                    Err(PlaybackApiError::InvalidResponsePlaybackData)
                ),
                "body {:?} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_not_found_with_reason() {
        let response = RawResponse::new(
            404,
            r#"{"message":"not found","reason":"NO_ENTITY_EXIST"}"#,
        );
        assert_api_error(
            classify_entry_response(&response),
            404,
            "not found",
            PlaybackErrorReason::NoEntityExist,
        );
    }

    #[test]
    fn test_unauthorized_with_undecodable_body() {
        let response = RawResponse::new(401, "Unauthorized");
        assert_api_error(
            classify_entry_response(&response),
            401,
            "Unknown authentication error",
            PlaybackErrorReason::UnknownError("Unknown authentication error reason".to_string()),
        );
    }

    #[test]
    fn test_error_envelope_without_fields() {
        let response = RawResponse::new(403, "{}");
        assert_api_error(
            classify_entry_response(&response),
            403,
            "Unknown authentication error message",
            PlaybackErrorReason::UnknownError("Unknown authentication error reason".to_string()),
        );
    }

    #[test]
    fn test_lowercase_reason() {
        let response = RawResponse::new(
            401,
            r#"{"message":"Too many devices","reason":"too_many_devices"}"#,
        );
        assert_api_error(
            classify_entry_response(&response),
            401,
            "Too many devices",
            PlaybackErrorReason::TooManyDevices,
        );
    }

    #[test]
    fn test_redirect_status_is_not_success() {
        let response = RawResponse::new(304, "");
        assert!(!response.is_success());
        assert!(matches!(
            classify_entry_response(&response),
            Err(PlaybackApiError::ApiError { status_code: 304, .. })
        ));
    }

    #[test]
    fn test_player_information_error() {
        let response = RawResponse::new(
            400,
            r#"{"message":"Invalid key","reason":"API_KEY_ERROR"}"#,
        );
        assert_api_error(
            classify_player_information_response(&response),
            400,
            "Invalid key",
            PlaybackErrorReason::ApiKeyError,
        );
    }

    #[test]
    fn test_player_information_invalid_success_body() {
        let response = RawResponse::new(200, r#"{"player":{}}"#);
        assert!(matches!(
            classify_player_information_response(&response),
            Err(PlaybackApiError::InvalidResponsePlaybackData)
        ));
    }
}
