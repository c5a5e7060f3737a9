//! Command-line interface components
//!
//! This module contains CLI-specific code for the Playback SDK demo
//! application: argument parsing and the command handlers.

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, ConfigAction, ConfigArgs, EntryArgs, GlobalArgs, PlaylistArgs,
};
pub use commands::{
    describe_source, handle_config, handle_entry, handle_init, handle_playlist, SessionSettings,
};
