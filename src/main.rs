//! Playback SDK CLI application
//!
//! Command-line front end for the Playback SDK: initializes a session and
//! resolves entries and playlists into player sources.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use playback_sdk::cli::{
    handle_config, handle_entry, handle_init, handle_playlist, Cli, Commands,
};
use playback_sdk::config::AppConfig;
use playback_sdk::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.as_deref()).await?;

    init_logging(&cli, &config);

    info!("Playback SDK v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Init => {
            info!("Executing init command");
            handle_init(&cli.global, &config).await
        }
        Commands::Entry(args) => {
            info!("Executing entry command");
            handle_entry(args, &cli.global, &config).await
        }
        Commands::Playlist(args) => {
            info!("Executing playlist command");
            handle_playlist(args, &cli.global, &config).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(args, &cli.global, &config).await
        }
    }
}

/// Initialize logging from CLI verbosity, falling back to the config file level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli
        .log_level()
        .map(|level| level.to_string().to_lowercase())
        .unwrap_or_else(|| config.logging.level.clone());

    let mut filter = EnvFilter::from_default_env();
    match format!("playback_sdk={}", log_level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring invalid log level '{}': {}", log_level, e),
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
