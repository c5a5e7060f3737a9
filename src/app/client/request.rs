//! Request construction for the Playback API
//!
//! Builds fully formed GET request descriptors for the player configuration
//! and entry detail endpoints from the session configuration.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Method;
use url::Url;

use crate::app::session::SessionConfiguration;
use crate::constants::{api, headers};
use crate::errors::{ApiResult, PlaybackApiError};

/// A GET request ready to be executed by the HTTP handler
#[derive(Debug, Clone)]
pub struct PlaybackRequest {
    url: Url,
    headers: HeaderMap,
}

impl PlaybackRequest {
    /// Request for `GET {base}/entry/{entry_id}`
    ///
    /// The entry ID is percent-encoded as a single path segment. The bearer
    /// token is only sent when it is non-blank.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlaybackDataUrl` if the entry ID is empty or a dot
    /// segment, or the base URL cannot carry a path, and `InvalidHeaderValue` if a header value is
    /// not legal HTTP.
    pub fn entry(
        config: &SessionConfiguration,
        entry_id: &str,
        authorization_token: Option<&str>,
    ) -> ApiResult<Self> {
        // Dot segments would be normalized away, addressing another resource
        if matches!(entry_id, "" | "." | "..") {
            return Err(PlaybackApiError::InvalidPlaybackDataUrl);
        }

        let url = endpoint_url(&config.base_url, &[api::ENTRY_PATH, entry_id])
            .ok_or(PlaybackApiError::InvalidPlaybackDataUrl)?;

        let mut header_map = common_headers(config)?;
        if let Some(token) = non_blank(authorization_token) {
            let value = HeaderValue::from_str(&format!("{}{}", headers::BEARER_PREFIX, token))
                .map_err(|_| PlaybackApiError::InvalidHeaderValue {
                    header: "Authorization",
                })?;
            header_map.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            url,
            headers: header_map,
        })
    }

    /// Request for `GET {base}/player`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlayerInformationUrl` if the base URL is malformed
    pub fn player_information(config: &SessionConfiguration) -> ApiResult<Self> {
        let url = endpoint_url(&config.base_url, &[api::PLAYER_PATH])
            .ok_or(PlaybackApiError::InvalidPlayerInformationUrl)?;
        Ok(Self {
            url,
            headers: common_headers(config)?,
        })
    }

    pub fn method(&self) -> Method {
        Method::GET
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Headers shared by both endpoints
fn common_headers(config: &SessionConfiguration) -> ApiResult<HeaderMap> {
    let mut map = HeaderMap::new();
    map.insert(ACCEPT, HeaderValue::from_static(headers::ACCEPT_JSON));

    let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| {
        PlaybackApiError::InvalidHeaderValue {
            header: headers::API_KEY,
        }
    })?;
    map.insert(HeaderName::from_static(headers::API_KEY), api_key);

    if let Some(user_agent) = non_blank(config.user_agent.as_deref()) {
        let value = HeaderValue::from_str(user_agent).map_err(|_| {
            PlaybackApiError::InvalidHeaderValue {
                header: "User-Agent",
            }
        })?;
        map.insert(USER_AGENT, value);
    }

    Ok(map)
}

/// Append path segments to the base URL
fn endpoint_url(base_url: &str, segments: &[&str]) -> Option<Url> {
    let mut url = Url::parse(base_url).ok()?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return None;
    }

    {
        let mut path = url.path_segments_mut().ok()?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }

    Some(url)
}

/// Treat empty and whitespace-only values as absent
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
