//! Player source construction
//!
//! Converts entry metadata into the source descriptors handed to the video
//! player: one `SourceConfig` per playable entry, wrapped as a single source
//! or an ordered playlist.

use std::collections::BTreeMap;

use url::Url;

use crate::app::aggregator::LoadedEntry;
use crate::app::models::{CoverImageTier, PlaybackResponse, StreamFormat};

/// Metadata key holding the requested entry ID
pub const METADATA_ENTRY_ID: &str = "entryId";
/// Metadata key holding the entry duration
pub const METADATA_DURATION: &str = "duration";
/// Metadata key holding the thumbnail URL
pub const METADATA_THUMBNAIL: &str = "thumbnail";
/// Metadata key holding the resume position
pub const METADATA_PLAY_FROM: &str = "playFrom";

/// One playable stream with its display metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: Url,
    pub stream_type: StreamFormat,
    pub title: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl SourceConfig {
    /// Build a source from an entry record
    ///
    /// Returns `None` if the record has no parseable HLS URL.
    pub fn from_details(details: &PlaybackResponse) -> Option<Self> {
        let url = match Url::parse(details.hls_url()?) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Ignoring unparseable HLS URL: {}", e);
                return None;
            }
        };

        let mut metadata = BTreeMap::new();
        let fields = [
            (METADATA_ENTRY_ID, details.entry_identifier().map(str::to_string)),
            (METADATA_DURATION, details.duration.clone()),
            (METADATA_THUMBNAIL, details.thumbnail.clone()),
            (METADATA_PLAY_FROM, details.play_from.map(|p| p.to_string())),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                metadata.insert(key.to_string(), value);
            }
        }

        Some(Self {
            url,
            stream_type: StreamFormat::Hls,
            title: details.name.clone(),
            poster: details.cover_image(CoverImageTier::P360).map(str::to_string),
            description: details.description.clone(),
            metadata,
        })
    }

    /// Build a source for a requested entry, recording the requested ID
    pub fn from_entry(entry_id: &str, details: &PlaybackResponse) -> Option<Self> {
        let mut source = Self::from_details(details)?;
        source
            .metadata
            .insert(METADATA_ENTRY_ID.to_string(), entry_id.to_string());
        Some(source)
    }

    /// Entry ID this source was built for
    pub fn entry_id(&self) -> Option<&str> {
        self.metadata.get(METADATA_ENTRY_ID).map(String::as_str)
    }
}

/// Source descriptor accepted by a video player plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    Single(SourceConfig),
    Playlist {
        sources: Vec<SourceConfig>,
        start_index: usize,
    },
}

impl PlayerSource {
    /// Wrap sources, starting playback at the source for `entry_id_to_play`
    ///
    /// No sources gives `None`, one gives `Single`, more give a `Playlist`.
    /// An unknown or absent `entry_id_to_play` starts at the first source.
    pub fn from_sources(
        sources: Vec<SourceConfig>,
        entry_id_to_play: Option<&str>,
    ) -> Option<Self> {
        let start_index = entry_id_to_play
            .and_then(|wanted| {
                sources
                    .iter()
                    .position(|source| source.entry_id() == Some(wanted))
            })
            .unwrap_or(0);

        let mut sources = sources;
        match sources.len() {
            0 => None,
            1 => sources.pop().map(Self::Single),
            _ => Some(Self::Playlist {
                sources,
                start_index,
            }),
        }
    }

    /// Build a source over every playable loaded entry, in load order
    pub fn from_entries(
        entries: &[LoadedEntry],
        entry_id_to_play: Option<&str>,
    ) -> Option<Self> {
        let sources = entries
            .iter()
            .filter_map(|entry| SourceConfig::from_entry(&entry.entry_id, &entry.details))
            .collect();
        Self::from_sources(sources, entry_id_to_play)
    }

    pub fn sources(&self) -> &[SourceConfig] {
        match self {
            Self::Single(source) => std::slice::from_ref(source),
            Self::Playlist { sources, .. } => sources,
        }
    }

    /// Source that playback starts with
    ///
    /// `None` for a playlist whose start index is out of range.
    pub fn initial_source(&self) -> Option<&SourceConfig> {
        match self {
            Self::Single(source) => Some(source),
            Self::Playlist {
                sources,
                start_index,
            } => sources.get(*start_index),
        }
    }

    pub fn len(&self) -> usize {
        self.sources().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources().is_empty()
    }

    pub fn is_playlist(&self) -> bool {
        matches!(self, Self::Playlist { .. })
    }
}

/// Playback behavior flags for the player component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub autoplay_enabled: bool,
    pub background_playback_enabled: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay_enabled: true,
            background_playback_enabled: true,
        }
    }
}

/// Settings handed to a plugin before it loads a source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPlayerConfig {
    /// Player license obtained at initialize time
    pub license: Option<String>,
    pub playback: PlaybackConfig,
}
