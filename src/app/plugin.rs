//! Video player plugin registry
//!
//! The player itself lives outside this crate. Implementations of
//! `VideoPlayerPlugin` are registered with the session's `PluginManager`,
//! which holds at most one selected plugin.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::app::player::{PlayerSource, VideoPlayerConfig};
use crate::errors::{PluginError, PluginResult};

/// An externally implemented video player
pub trait VideoPlayerPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Apply license and playback settings before any source is loaded
    fn setup(&self, config: &VideoPlayerConfig);

    /// Load a single source or playlist
    fn load(&self, source: &PlayerSource) -> PluginResult<()>;

    fn play(&self);

    fn pause(&self);

    fn seek(&self, position: Duration);

    /// Stop playback and release the current source
    fn unload(&self);

    /// Release all player resources
    fn destroy(&self);
}

/// Single-slot registry for the active player plugin
#[derive(Default)]
pub struct PluginManager {
    selected: RwLock<Option<Arc<dyn VideoPlayerPlugin>>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `plugin`, returning the one it replaces
    pub fn register_plugin(
        &self,
        plugin: Arc<dyn VideoPlayerPlugin>,
    ) -> Option<Arc<dyn VideoPlayerPlugin>> {
        tracing::info!("Registering player plugin {} {}", plugin.name(), plugin.version());
        let mut selected = self.selected.write().unwrap_or_else(PoisonError::into_inner);
        selected.replace(plugin)
    }

    /// Clear the selection, returning the plugin that was selected
    pub fn unregister_plugin(&self) -> Option<Arc<dyn VideoPlayerPlugin>> {
        let mut selected = self.selected.write().unwrap_or_else(PoisonError::into_inner);
        let previous = selected.take();
        if let Some(plugin) = &previous {
            tracing::info!("Unregistered player plugin {}", plugin.name());
        }
        previous
    }

    pub fn selected_plugin(&self) -> Option<Arc<dyn VideoPlayerPlugin>> {
        self.selected
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_plugin(&self) -> bool {
        self.selected_plugin().is_some()
    }

    /// Configure the selected plugin and load `source` into it
    ///
    /// # Errors
    ///
    /// Returns `PluginError::NoPluginSelected` if no plugin is registered,
    /// or whatever error the plugin reports while loading.
    pub fn load_source(
        &self,
        source: &PlayerSource,
        config: &VideoPlayerConfig,
    ) -> PluginResult<Arc<dyn VideoPlayerPlugin>> {
        let plugin = self.selected_plugin().ok_or(PluginError::NoPluginSelected)?;

        plugin.setup(config);
        plugin.load(source)?;
        tracing::debug!(
            "Loaded {} source(s) into player plugin {}",
            source.len(),
            plugin.name()
        );

        Ok(plugin)
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let selected = self.selected_plugin();
        f.debug_struct("PluginManager")
            .field("selected", &selected.as_ref().map(|plugin| plugin.name().to_string()))
            .finish()
    }
}
