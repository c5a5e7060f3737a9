//! SDK session management
//!
//! A `PlaybackSession` owns the API services, the plugin registry and the
//! session state. It must be initialized with an API key, which fetches the
//! player configuration and caches its license, before any entry can be
//! loaded.
//!
//! # Examples
//!
//! ```rust,no_run
//! use playback_sdk::app::{ClientConfig, PlaybackSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = PlaybackSession::new(&ClientConfig::default())?;
//! let license = session.initialize("api-key", None, None).await?;
//! println!("Player license: {}", license);
//!
//! let playlist = session
//!     .load_playlist(&["0_abc", "0_def"], Some("0_def"), None)
//!     .await?;
//! println!("{} entries failed", playlist.failures.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::app::aggregator::{AggregateResult, EntryFailure, PlaylistAggregator};
use crate::app::client::{ClientConfig, PlaybackApi, PlaybackApiService, PlayerInformationApi};
use crate::app::models::{PlaybackResponse, PlayerInformationResponse};
use crate::app::player::{PlayerSource, SourceConfig, VideoPlayerConfig};
use crate::app::plugin::{PluginManager, VideoPlayerPlugin};
use crate::constants::api::DEFAULT_BASE_URL;
use crate::errors::{ApiResult, PlaybackApiError, PluginResult, SdkError, SdkResult};

/// Everything needed to talk to the API on behalf of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfiguration {
    pub api_key: String,
    pub base_url: String,
    /// Replaces the default `User-Agent` when non-blank
    pub user_agent: Option<String>,
    pub license: Option<String>,
    pub analytics_env_key: Option<String>,
    pub analytics_player_name: Option<String>,
    pub resume_enabled: bool,
    pub default_player: Option<String>,
}

impl SessionConfiguration {
    /// Configuration before the player information has been fetched
    pub fn new(api_key: &str, base_url: Option<&str>, user_agent: Option<&str>) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            user_agent: user_agent.map(str::to_string),
            license: None,
            analytics_env_key: None,
            analytics_player_name: None,
            resume_enabled: false,
            default_player: None,
        }
    }

    /// Cache the license and integration settings from `/player`
    pub fn apply_player_information(&mut self, info: &PlayerInformationResponse) {
        let integrations = &info.player.bitmovin.integrations;
        self.license = Some(info.license().to_string());
        self.analytics_env_key = Some(integrations.mux.env_key.clone());
        self.analytics_player_name = Some(integrations.mux.player_name.clone());
        self.resume_enabled = integrations.resume.enabled;
        self.default_player = Some(info.defaults.player.clone());
    }
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Ready(SessionConfiguration),
}

/// Outcome of loading a playlist
#[derive(Debug)]
pub struct PlaylistLoad {
    /// `None` when no requested entry was playable
    pub source: Option<PlayerSource>,
    /// Entries that failed to load or had no HLS stream, in input order
    pub failures: Vec<EntryFailure>,
}

/// An SDK session: API services, state and the player plugin registry
pub struct PlaybackSession {
    playback_api: Arc<dyn PlaybackApi>,
    player_information_api: Arc<dyn PlayerInformationApi>,
    state: RwLock<SessionState>,
    plugins: PluginManager,
}

impl PlaybackSession {
    /// Create a session backed by the HTTP services
    ///
    /// # Errors
    ///
    /// Returns `PlaybackApiError::NetworkError` if the HTTP client cannot be built
    pub fn new(client_config: &ClientConfig) -> ApiResult<Self> {
        let service = Arc::new(PlaybackApiService::new(client_config)?);
        Ok(Self::with_services(service.clone(), service))
    }

    /// Create a session over arbitrary service implementations
    pub fn with_services(
        playback_api: Arc<dyn PlaybackApi>,
        player_information_api: Arc<dyn PlayerInformationApi>,
    ) -> Self {
        Self {
            playback_api,
            player_information_api,
            state: RwLock::new(SessionState::Uninitialized),
            plugins: PluginManager::new(),
        }
    }

    /// Initialize the session and return the player license
    ///
    /// Any previous configuration is discarded first, so the session is only
    /// `Ready` after a call that succeeds. `base_url` defaults to the
    /// production API.
    ///
    /// # Errors
    ///
    /// - `SdkError::InitializationError` for a blank API key (no request is made)
    /// - `SdkError::MissingLicense` if the player configuration has no license
    /// - `SdkError::Api` if fetching the player configuration fails
    pub async fn initialize(
        &self,
        api_key: &str,
        base_url: Option<&str>,
        user_agent: Option<&str>,
    ) -> SdkResult<String> {
        if api_key.trim().is_empty() {
            tracing::warn!("Refusing to initialize with an empty API key");
            return Err(SdkError::InitializationError);
        }

        *self.state.write().await = SessionState::Uninitialized;

        let mut config = SessionConfiguration::new(api_key, base_url, user_agent);
        tracing::info!("Initializing Playback SDK against {}", config.base_url);

        let info = self
            .player_information_api
            .get_player_information(&config)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to fetch player information: {}", e);
                SdkError::Api(e)
            })?;

        if info.license().is_empty() {
            tracing::warn!("Player information did not include a license");
            return Err(SdkError::MissingLicense);
        }

        config.apply_player_information(&info);
        let license = info.license().to_string();
        *self.state.write().await = SessionState::Ready(config);

        tracing::info!("Playback SDK initialized");
        Ok(license)
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Ready(_))
    }

    /// Current configuration, if the session is ready
    pub async fn configuration(&self) -> Option<SessionConfiguration> {
        match &*self.state.read().await {
            SessionState::Ready(config) => Some(config.clone()),
            SessionState::Uninitialized => None,
        }
    }

    pub async fn license(&self) -> Option<String> {
        self.configuration().await.and_then(|config| config.license)
    }

    /// Player settings carrying the cached license
    pub async fn player_config(&self) -> VideoPlayerConfig {
        VideoPlayerConfig {
            license: self.license().await,
            ..Default::default()
        }
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    /// Snapshot of the ready configuration
    ///
    /// The lock is released before any request is sent.
    async fn ready_configuration(&self) -> ApiResult<SessionConfiguration> {
        self.configuration()
            .await
            .ok_or(PlaybackApiError::InitializationError)
    }

    /// Fetch the metadata record for one entry
    ///
    /// # Errors
    ///
    /// `InitializationError` if the session is not ready, otherwise whatever
    /// the entry fetch reports.
    pub async fn load_hls_stream(
        &self,
        entry_id: &str,
        authorization_token: Option<&str>,
    ) -> ApiResult<PlaybackResponse> {
        let config = self.ready_configuration().await?;
        self.playback_api
            .get_video_details(&config, entry_id, authorization_token)
            .await
    }

    /// Fetch every entry concurrently, keeping input order
    ///
    /// # Errors
    ///
    /// Only `InitializationError`; per-entry failures are in the result.
    pub async fn load_all_hls_streams<S>(
        &self,
        entry_ids: &[S],
        authorization_token: Option<&str>,
    ) -> ApiResult<AggregateResult>
    where
        S: AsRef<str> + Sync,
    {
        let config = self.ready_configuration().await?;
        let result = PlaylistAggregator::new(self.playback_api.as_ref(), &config)
            .load_all(entry_ids, authorization_token)
            .await;
        Ok(result)
    }

    /// Load one entry as a single player source
    ///
    /// # Errors
    ///
    /// `LoadHlsStreamError` if the entry has no usable HLS stream, plus
    /// anything `load_hls_stream` reports.
    pub async fn load_player(
        &self,
        entry_id: &str,
        authorization_token: Option<&str>,
    ) -> ApiResult<PlayerSource> {
        let details = self.load_hls_stream(entry_id, authorization_token).await?;

        SourceConfig::from_entry(entry_id, &details)
            .map(PlayerSource::Single)
            .ok_or_else(|| {
                tracing::warn!("Entry {} has no playable HLS stream", entry_id);
                PlaybackApiError::LoadHlsStreamError
            })
    }

    /// Load several entries as a playlist
    ///
    /// Entries that fail, or load without an HLS stream, are skipped and
    /// reported in `failures`. Playback starts at `entry_id_to_play` when it
    /// is among the playable entries.
    ///
    /// # Errors
    ///
    /// Only `InitializationError`.
    pub async fn load_playlist<S>(
        &self,
        entry_ids: &[S],
        entry_id_to_play: Option<&str>,
        authorization_token: Option<&str>,
    ) -> ApiResult<PlaylistLoad>
    where
        S: AsRef<str> + Sync,
    {
        let result = self
            .load_all_hls_streams(entry_ids, authorization_token)
            .await?;

        let mut sources = Vec::with_capacity(result.successes.len());
        let mut failures = result.failures;
        for entry in &result.successes {
            match SourceConfig::from_entry(&entry.entry_id, &entry.details) {
                Some(source) => sources.push(source),
                None => failures.push(EntryFailure {
                    index: entry.index,
                    entry_id: entry.entry_id.clone(),
                    error: PlaybackApiError::LoadHlsStreamError,
                }),
            }
        }
        failures.sort_by_key(|failure| failure.index);

        Ok(PlaylistLoad {
            source: PlayerSource::from_sources(sources, entry_id_to_play),
            failures,
        })
    }

    /// Hand `source` to the selected plugin, configured with this session's license
    ///
    /// # Errors
    ///
    /// `PluginError::NoPluginSelected` if no plugin is registered
    pub async fn present(&self, source: &PlayerSource) -> PluginResult<Arc<dyn VideoPlayerPlugin>> {
        let config = self.player_config().await;
        self.plugins.load_source(source, &config)
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("plugins", &self.plugins)
            .finish_non_exhaustive()
    }
}
