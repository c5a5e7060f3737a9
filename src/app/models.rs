//! Data models for the Playback API
//!
//! Response envelopes for the entry detail and player configuration endpoints.
//! Entry records are all-optional because the API reuses the same envelope
//! for error bodies (`message` / `reason`).

use serde::{Deserialize, Serialize};

/// Stream formats the API can return for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamFormat {
    /// HTTP Live Streaming (`media.hls`)
    Hls,
    /// MPEG-DASH (`media.mpegdash`)
    Dash,
    /// Progressive download (`media.applehttp`)
    Progressive,
}

impl std::fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Hls => "hls",
            Self::Dash => "dash",
            Self::Progressive => "progressive",
        };
        write!(f, "{}", name)
    }
}

/// Cover image resolution tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverImageTier {
    P360,
    P720,
    P1080,
}

/// Stream URLs of an entry, by format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mpegdash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applehttp: Option<String>,
}

/// Advertisement break descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discard_after_playback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload_offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skippable_after: Option<i64>,
}

/// Cover image URLs keyed by vertical resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverImages {
    #[serde(rename = "360", default, skip_serializing_if = "Option::is_none")]
    pub p360: Option<String>,
    #[serde(rename = "720", default, skip_serializing_if = "Option::is_none")]
    pub p720: Option<String>,
    #[serde(rename = "1080", default, skip_serializing_if = "Option::is_none")]
    pub p1080: Option<String>,
}

/// Video metadata record decoded from `GET /entry/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_from: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adverts: Option<Vec<Advert>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_img: Option<CoverImages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
}

impl PlaybackResponse {
    /// Stream URL for the given format, if the entry has one
    pub fn stream_url(&self, format: StreamFormat) -> Option<&str> {
        let media = self.media.as_ref()?;
        match format {
            StreamFormat::Hls => media.hls.as_deref(),
            StreamFormat::Dash => media.mpegdash.as_deref(),
            StreamFormat::Progressive => media.applehttp.as_deref(),
        }
    }

    /// HLS stream URL, the format handed to the player
    pub fn hls_url(&self) -> Option<&str> {
        self.stream_url(StreamFormat::Hls)
    }

    /// Cover image URL for the given tier
    pub fn cover_image(&self, tier: CoverImageTier) -> Option<&str> {
        let covers = self.cover_img.as_ref()?;
        match tier {
            CoverImageTier::P360 => covers.p360.as_deref(),
            CoverImageTier::P720 => covers.p720.as_deref(),
            CoverImageTier::P1080 => covers.p1080.as_deref(),
        }
    }

    /// Identifier of the entry: `entryId` when present, otherwise `id`
    pub fn entry_identifier(&self) -> Option<&str> {
        self.entry_id.as_deref().or(self.id.as_deref())
    }
}

/// Error envelope carried by non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Player configuration decoded from `GET /player`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInformationResponse {
    pub player: PlayerInfo,
    pub defaults: PlayerDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub bitmovin: BitmovinConfig,
}

/// Third-party player settings, including the license key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmovinConfig {
    pub license: String,
    pub integrations: Integrations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integrations {
    pub mux: MuxIntegration,
    pub resume: ResumeIntegration,
}

/// Analytics integration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuxIntegration {
    pub player_name: String,
    pub env_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeIntegration {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDefaults {
    pub player: String,
}

impl PlayerInformationResponse {
    /// License key for the player component
    pub fn license(&self) -> &str {
        &self.player.bitmovin.license
    }
}
