//! Command-line argument parsing for the Playback SDK CLI
//!
//! This module defines the CLI structure using clap derive macros,
//! providing commands to initialize a session, load single entries and
//! playlists, and manage the configuration file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Playback SDK - Resolve video entries into playable sources
#[derive(Parser, Debug)]
#[command(
    name = "playback_sdk",
    version,
    about = "Resolve Playback API entries into playable HLS sources",
    long_about = "A command-line front end for the Playback SDK.
Initializes a session with an API key, fetches entry details concurrently and
prints the player sources that would be handed to a video player."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Playback API key (falls back to PLAYBACK_API_KEY, then a prompt)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Playback API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Replace the SDK User-Agent header
    #[arg(long, global = true, value_name = "AGENT")]
    pub user_agent: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a session and show the player configuration
    Init,

    /// Load a single entry
    Entry(EntryArgs),

    /// Load several entries as a playlist
    Playlist(PlaylistArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the entry command
#[derive(Args, Debug, Clone)]
pub struct EntryArgs {
    /// Entry ID to load
    #[arg(value_name = "ENTRY_ID")]
    pub entry_id: String,

    /// Bearer token for entitlement-protected entries
    #[arg(short, long)]
    pub token: Option<String>,

    /// Print the raw entry record as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the playlist command
#[derive(Args, Debug, Clone)]
pub struct PlaylistArgs {
    /// Entry IDs, in playlist order
    #[arg(value_name = "ENTRY_ID", required = true)]
    pub entry_ids: Vec<String>,

    /// Entry to start playback from
    #[arg(short, long, value_name = "ENTRY_ID")]
    pub play: Option<String>,

    /// Bearer token for entitlement-protected entries
    #[arg(short, long)]
    pub token: Option<String>,
}

/// Arguments for configuration management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Where to write the file (defaults to the user config directory)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level forced by the verbosity flags, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::DEBUG)
        } else if self.global.verbose {
            Some(tracing::Level::INFO)
        } else {
            None
        }
    }
}

impl EntryArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.entry_id.trim().is_empty() {
            return Err("Entry ID cannot be empty".to_string());
        }
        Ok(())
    }
}

impl PlaylistArgs {
    /// Reject blank entry IDs and a start entry outside the playlist
    pub fn validate(&self) -> Result<(), String> {
        if let Some(position) = self.entry_ids.iter().position(|id| id.trim().is_empty()) {
            return Err(format!("Entry ID at position {} is empty", position + 1));
        }

        if let Some(play) = &self.play {
            if !self.entry_ids.contains(play) {
                return Err(format!("--play entry '{}' is not in the playlist", play));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(entry_ids: &[&str], play: Option<&str>) -> PlaylistArgs {
        PlaylistArgs {
            entry_ids: entry_ids.iter().map(|id| id.to_string()).collect(),
            play: play.map(str::to_string),
            token: None,
        }
    }

    #[test]
    fn test_playlist_args_validation() {
        // Valid configuration
        assert!(playlist(&["a", "b"], None).validate().is_ok());
        assert!(playlist(&["a", "b"], Some("b")).validate().is_ok());

        // Invalid: blank entry
        assert!(playlist(&["a", " "], None).validate().is_err());

        // Invalid: start entry not requested
        assert!(playlist(&["a", "b"], Some("c")).validate().is_err());
    }

    #[test]
    fn test_entry_args_validation() {
        let args = EntryArgs {
            entry_id: String::new(),
            token: None,
            json: false,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_playlist_command() {
        let cli = Cli::try_parse_from([
            "playback_sdk",
            "--api-key",
            "key",
            "playlist",
            "0_a",
            "0_b",
            "--play",
            "0_b",
        ])
        .unwrap();

        assert_eq!(cli.global.api_key.as_deref(), Some("key"));
        match cli.command {
            Commands::Playlist(args) => {
                assert_eq!(args.entry_ids, vec!["0_a", "0_b"]);
                assert_eq!(args.play.as_deref(), Some("0_b"));
            }
            other => panic!("Expected playlist command, got {:?}", other),
        }
    }

    #[test]
    fn test_playlist_requires_entries() {
        assert!(Cli::try_parse_from(["playback_sdk", "playlist"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let cli_quiet = Cli {
            global: GlobalArgs {
                quiet: true,
                ..Default::default()
            },
            command: Commands::Init,
        };

        let cli_verbose = Cli {
            global: GlobalArgs {
                verbose: true,
                ..Default::default()
            },
            command: Commands::Init,
        };

        let cli_default = Cli {
            global: GlobalArgs::default(),
            command: Commands::Init,
        };

        assert_eq!(cli_quiet.log_level(), Some(tracing::Level::ERROR));
        assert_eq!(cli_verbose.log_level(), Some(tracing::Level::INFO));
        assert_eq!(cli_default.log_level(), None);
    }
}
