//! Command handlers for the Playback SDK CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments, the configuration file and the SDK session.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::app::{ClientConfig, PlaybackSession, PlayerSource, SourceConfig};
use crate::cli::{ConfigAction, ConfigArgs, EntryArgs, GlobalArgs, PlaylistArgs};
use crate::config::AppConfig;
use crate::constants::env;
use crate::errors::{AppError, Result};

/// Everything needed to start a session, after merging flags and config
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub api_key: String,
    pub base_url: String,
    pub user_agent: Option<String>,
    pub client: ClientConfig,
}

impl SessionSettings {
    /// Merge CLI flags over the loaded configuration
    ///
    /// The API key comes from `--api-key`, then `PLAYBACK_API_KEY`, then an
    /// interactive prompt.
    pub fn resolve(global: &GlobalArgs, config: &AppConfig) -> Result<Self> {
        Ok(Self {
            api_key: resolve_api_key(global.api_key.as_deref())?,
            base_url: global
                .base_url
                .clone()
                .unwrap_or_else(|| config.session.base_url.clone()),
            user_agent: global
                .user_agent
                .clone()
                .or_else(|| config.session.user_agent.clone()),
            client: config.client.to_runtime_config(),
        })
    }
}

/// Find the API key without printing it anywhere
fn resolve_api_key(flag: Option<&str>) -> Result<String> {
    if let Some(key) = flag.map(str::trim).filter(|key| !key.is_empty()) {
        debug!("Using API key from --api-key");
        return Ok(key.to_string());
    }

    if let Ok(key) = std::env::var(env::API_KEY) {
        if !key.trim().is_empty() {
            debug!("Using API key from {}", env::API_KEY);
            return Ok(key.trim().to_string());
        }
    }

    let key = rpassword::prompt_password("Playback API key: ")?;
    if key.trim().is_empty() {
        return Err(AppError::generic("API key cannot be empty"));
    }
    Ok(key.trim().to_string())
}

/// Spinner shown while waiting on the API; hidden in quiet mode
fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        Ok(style) => spinner.set_style(style.tick_strings(&["◐", "◓", "◑", "◒"])),
        Err(e) => debug!("Falling back to default spinner style: {}", e),
    }
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Create and initialize a session
async fn start_session(
    settings: &SessionSettings,
    quiet: bool,
) -> Result<(PlaybackSession, String)> {
    let session = PlaybackSession::new(&settings.client)?;

    let progress = spinner("Fetching player configuration...", quiet);
    let result = session
        .initialize(
            &settings.api_key,
            Some(&settings.base_url),
            settings.user_agent.as_deref(),
        )
        .await;
    progress.finish_and_clear();

    let license = result?;
    Ok((session, license))
}

/// Handle the init command
pub async fn handle_init(global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    let settings = SessionSettings::resolve(global, config)?;
    let (session, license) = start_session(&settings, global.quiet).await?;

    let configuration = session
        .configuration()
        .await
        .ok_or_else(|| AppError::generic("Session is not ready after initialize"))?;

    println!("✅ Session initialized against {}", configuration.base_url);
    println!("   License: {}", mask(&license));
    if let Some(player) = &configuration.default_player {
        println!("   Default player: {}", player);
    }
    if let Some(name) = &configuration.analytics_player_name {
        println!("   Analytics player name: {}", name);
    }
    println!(
        "   Resume: {}",
        if configuration.resume_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    Ok(())
}

/// Handle the entry command
pub async fn handle_entry(
    args: EntryArgs,
    global: &GlobalArgs,
    config: &AppConfig,
) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let settings = SessionSettings::resolve(global, config)?;
    let (session, _) = start_session(&settings, global.quiet).await?;

    let progress = spinner(format!("Loading entry {}...", args.entry_id), global.quiet);
    let start_time = Instant::now();

    if args.json {
        let details = session
            .load_hls_stream(&args.entry_id, args.token.as_deref())
            .await;
        progress.finish_and_clear();

        let json = serde_json::to_string_pretty(&details?)
            .map_err(|e| AppError::generic(format!("Failed to render entry as JSON: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    let source = session
        .load_player(&args.entry_id, args.token.as_deref())
        .await;
    progress.finish_and_clear();
    let source = source?;

    info!("Loaded entry {} in {:?}", args.entry_id, start_time.elapsed());
    println!("✅ Loaded entry {}", args.entry_id);
    print!("{}", describe_source(&source));

    Ok(())
}

/// Handle the playlist command
pub async fn handle_playlist(
    args: PlaylistArgs,
    global: &GlobalArgs,
    config: &AppConfig,
) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let settings = SessionSettings::resolve(global, config)?;
    let (session, _) = start_session(&settings, global.quiet).await?;

    let progress = spinner(
        format!("Loading {} entries...", args.entry_ids.len()),
        global.quiet,
    );
    let start_time = Instant::now();
    let playlist = session
        .load_playlist(&args.entry_ids, args.play.as_deref(), args.token.as_deref())
        .await;
    progress.finish_and_clear();
    let playlist = playlist?;

    info!(
        "Loaded playlist of {} entries in {:?}",
        args.entry_ids.len(),
        start_time.elapsed()
    );

    match &playlist.source {
        Some(source) => {
            println!(
                "✅ Playlist ready: {} of {} entries playable",
                source.len(),
                args.entry_ids.len()
            );
            print!("{}", describe_source(source));
        }
        None => println!("⚠️  None of the requested entries are playable"),
    }

    if !playlist.failures.is_empty() {
        println!();
        println!("❌ {} entries failed:", playlist.failures.len());
        for failure in &playlist.failures {
            warn!("Entry {} failed: {}", failure.entry_id, failure.error);
            println!(
                "   [{}] {}: {}",
                failure.index + 1,
                failure.entry_id,
                failure.error
            );
        }
    }

    if playlist.source.is_none() {
        return Err(AppError::generic("No playable entries"));
    }
    Ok(())
}

/// Handle configuration management
pub async fn handle_config(
    args: ConfigArgs,
    global: &GlobalArgs,
    config: &AppConfig,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            match global.config.clone().or_else(AppConfig::find_config_file) {
                Some(path) => println!("# Loaded from {}", path.display()),
                None => println!("# No configuration file found, showing defaults"),
            }
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { force, path } => {
            let path = match path {
                Some(path) => path,
                None => AppConfig::default_config_path()?,
            };

            if AppConfig::write_default(&path, force).await? {
                println!("📁 Created default configuration file:");
                println!("   {}", path.display());
            } else {
                println!("✅ Configuration file already exists. Use --force to overwrite.");
                println!("   {}", path.display());
            }
            Ok(())
        }
    }
}

/// Human-readable listing of a player source
pub fn describe_source(source: &PlayerSource) -> String {
    let mut out = String::new();

    match source {
        PlayerSource::Single(config) => describe_config(&mut out, config, None),
        PlayerSource::Playlist {
            sources,
            start_index,
        } => {
            for (index, config) in sources.iter().enumerate() {
                let marker = if index == *start_index { "▶" } else { " " };
                describe_config(&mut out, config, Some((index, marker)));
            }
        }
    }

    out
}

fn describe_config(out: &mut String, config: &SourceConfig, position: Option<(usize, &str)>) {
    let indent = match position {
        Some((index, marker)) => {
            out.push_str(&format!(
                " {} {}. {}\n",
                marker,
                index + 1,
                config.title.as_deref().unwrap_or("(untitled)")
            ));
            "      "
        }
        None => {
            out.push_str(&format!(
                "   Title: {}\n",
                config.title.as_deref().unwrap_or("(untitled)")
            ));
            "   "
        }
    };

    out.push_str(&format!("{}Stream ({}): {}\n", indent, config.stream_type, config.url));
    if let Some(entry_id) = config.entry_id() {
        out.push_str(&format!("{}Entry: {}\n", indent, entry_id));
    }
    if let Some(poster) = &config.poster {
        out.push_str(&format!("{}Poster: {}\n", indent, poster));
    }
}

/// Show only the last four characters of a secret
fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("****{}", visible)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use url::Url;

    use super::*;
    use crate::app::StreamFormat;

    fn source(entry_id: &str, title: &str) -> SourceConfig {
        let mut metadata = BTreeMap::new();
        metadata.insert("entryId".to_string(), entry_id.to_string());
        SourceConfig {
            url: Url::parse(&format!("https://cdn.example.com/{}.m3u8", entry_id)).unwrap(),
            stream_type: StreamFormat::Hls,
            title: Some(title.to_string()),
            poster: None,
            description: None,
            metadata,
        }
    }

    #[test]
    fn test_settings_prefer_flags_over_config() {
        let global = GlobalArgs {
            api_key: Some("flag-key".to_string()),
            base_url: Some("https://flag.example.com/v1".to_string()),
            ..Default::default()
        };
        let mut config = AppConfig::default();
        config.session.user_agent = Some("FromConfig/1.0".to_string());

        let settings = SessionSettings::resolve(&global, &config).unwrap();
        assert_eq!(settings.api_key, "flag-key");
        assert_eq!(settings.base_url, "https://flag.example.com/v1");
        assert_eq!(settings.user_agent.as_deref(), Some("FromConfig/1.0"));
    }

    #[test]
    fn test_settings_fall_back_to_config() {
        let global = GlobalArgs {
            api_key: Some("  padded  ".to_string()),
            ..Default::default()
        };
        let config = AppConfig::default();

        let settings = SessionSettings::resolve(&global, &config).unwrap();
        assert_eq!(settings.api_key, "padded");
        assert_eq!(settings.base_url, crate::constants::DEFAULT_BASE_URL);
        assert!(settings.user_agent.is_none());
    }

    #[test]
    fn test_describe_playlist_marks_start() {
        let playlist = PlayerSource::Playlist {
            sources: vec![source("0_a", "First"), source("0_b", "Second")],
            start_index: 1,
        };

        let text = describe_source(&playlist);
        assert!(text.contains("   1. First"));
        assert!(text.contains(" ▶ 2. Second"));
        assert!(text.contains("Stream (hls): https://cdn.example.com/0_b.m3u8"));
    }

    #[test]
    fn test_describe_single_source() {
        let text = describe_source(&PlayerSource::Single(source("0_a", "Only")));
        assert!(text.starts_with("   Title: Only\n"));
        assert!(text.contains("   Entry: 0_a\n"));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefgh"), "****efgh");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }
}
