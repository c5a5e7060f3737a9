//! Configuration management for the Playback SDK CLI
//!
//! Settings come from a TOML file (when one exists), then environment
//! variables, then command-line flags. Every section is optional; missing
//! keys fall back to the built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::ClientConfig;
use crate::constants::{api, config as paths, env, http, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Session defaults used by `initialize`
    pub session: SessionConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
///
/// Durations are written in humantime form, e.g. `"30s"` or `"1m 30s"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// TCP keep-alive interval
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub tcp_keepalive: Option<Duration>,
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub pool_idle_timeout: Option<Duration>,
    pub pool_max_per_host: usize,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            tcp_keepalive: Some(Duration::from_secs(30)),
            tcp_nodelay: true,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            tcp_keepalive: self.tcp_keepalive,
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout,
            pool_max_per_host: self.pool_max_per_host,
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

/// Session defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfigToml {
    /// Playback API base URL
    pub base_url: String,
    /// User-Agent override (absent = SDK default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for SessionConfigToml {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            user_agent: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, else the first standard location found)
    /// 3. Environment variables
    ///
    /// CLI flags are applied on top by the caller.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` if an explicit path does not exist, or any
    /// read/parse error for the file that was found.
    pub async fn load(config_file_override: Option<&Path>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(env::BASE_URL) {
            if !base_url.trim().is_empty() {
                debug!("Using base URL from {}", env::BASE_URL);
                self.session.base_url = base_url.trim().to_string();
            }
        }
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(paths::LOCAL_FILE)];
        if let Ok(user_path) = Self::default_config_path() {
            search_paths.push(user_path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        None
    }

    /// Default config file path for the current user
    ///
    /// # Errors
    ///
    /// `ConfigError::NoConfigDirectory` if the platform has no config dir
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        Ok(config_dir.join(paths::APP_DIR).join(paths::FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Write the default configuration file to `path`
    ///
    /// Parent directories are created as needed. An existing file is left
    /// untouched unless `overwrite` is set; returns whether a file was written.
    pub async fn write_default(path: &Path, overwrite: bool) -> ConfigResult<bool> {
        if path.exists() && !overwrite {
            debug!("Config file already exists: {}", path.display());
            return Ok(false);
        }

        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(io_error)?;

        info!("Wrote default configuration to: {}", path.display());
        Ok(true)
    }

    /// Render this configuration as TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Playback SDK Configuration
# Every setting is optional; remove a line to use the built-in default.

[client]
# HTTP client settings (durations use humantime syntax: "30s", "1m 30s")
tcp_keepalive = "30s"
tcp_nodelay = true
pool_idle_timeout = "{pool_idle}s"
pool_max_per_host = {pool_max}
request_timeout = "{request_timeout}s"
connect_timeout = "{connect_timeout}s"

[session]
# Playback API base URL (PLAYBACK_BASE_URL overrides this)
base_url = "{base_url}"
# user_agent = "MyApp/1.0"  # Uncomment to replace the SDK user agent

[logging]
level = "{level}"  # error, warn, info, debug, trace
"#,
            pool_idle = http::POOL_IDLE_TIMEOUT.as_secs(),
            pool_max = http::POOL_MAX_PER_HOST,
            request_timeout = http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout = http::CONNECT_TIMEOUT.as_secs(),
            base_url = api::DEFAULT_BASE_URL,
            level = logging::DEFAULT_LOG_LEVEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_creation() {
        let config = AppConfig::default();

        // Verify defaults are reasonable
        assert_eq!(config.session.base_url, api::DEFAULT_BASE_URL);
        assert!(config.session.user_agent.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.client.request_timeout, http::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_file_generation() {
        let content = AppConfig::generate_default_config_content();

        // Should be valid TOML matching the defaults
        let parsed: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed, AppConfig::default());
        assert!(content.contains("# Playback SDK Configuration"));
        assert!(content.contains("[client]"));
        assert!(content.contains("[session]"));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = AppConfig::default();
        config.client.request_timeout = Duration::from_secs(45);
        config.session.user_agent = Some("App/2.0".to_string());

        let rendered = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_client_runtime_conversion() {
        let toml = ClientConfigToml {
            request_timeout: Duration::from_secs(5),
            pool_idle_timeout: None,
            ..Default::default()
        };
        let runtime = toml.to_runtime_config();
        assert_eq!(runtime.request_timeout, Duration::from_secs(5));
        assert!(runtime.pool_idle_timeout.is_none());
        assert!(runtime.tcp_nodelay);
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        // Should fail when explicitly specified
        let result = AppConfig::load(Some(&config_path)).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_config_loading_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");

        let test_config = r#"
[client]
request_timeout = "1m 30s"

[logging]
level = "debug"
"#;
        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load_from_file(&config_path).await.unwrap();

        // Verify custom values were loaded
        assert_eq!(config.client.request_timeout, Duration::from_secs(90));
        assert_eq!(config.logging.level, "debug");

        // Verify defaults are still present for unspecified values
        assert_eq!(config.client.connect_timeout, http::CONNECT_TIMEOUT);
        assert_eq!(config.session.base_url, api::DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_config_loading_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[client]\nrequest_timeout = \"soon\"\n")
            .await
            .unwrap();

        let result = AppConfig::load_from_file(&config_path).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_write_default_respects_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        assert!(AppConfig::write_default(&config_path, false).await.unwrap());
        let written = AppConfig::load_from_file(&config_path).await.unwrap();
        assert_eq!(written, AppConfig::default());

        tokio::fs::write(&config_path, "[logging]\nlevel = \"warn\"\n")
            .await
            .unwrap();
        assert!(!AppConfig::write_default(&config_path, false).await.unwrap());
        let kept = AppConfig::load_from_file(&config_path).await.unwrap();
        assert_eq!(kept.logging.level, "warn");

        assert!(AppConfig::write_default(&config_path, true).await.unwrap());
    }
}
