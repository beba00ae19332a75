use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vocab_config::{Config, SyncMode};

mod logging;
mod media;
mod sync;


use self::logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "vocab-sync", about = "Synchronize a word list into an enriched vocabulary store")]
pub struct Cli {
    /// Persistence policy for this run
    #[arg(long, value_enum, default_value_t = SyncMode::Merge)]
    mode: SyncMode,
    /// Word list, one word per line (overrides WORDS_FILE)
    #[arg(long)]
    words: Option<PathBuf>,
    /// Vocabulary JSON file (overrides VOCABULARY_FILE)
    #[arg(long)]
    store: Option<PathBuf>,
    /// Media root holding `images` and `audio` (overrides MEDIA_DIR)
    #[arg(long)]
    media_dir: Option<PathBuf>,
    /// Skip image generation in replace mode
    #[arg(long)]
    no_images: bool,
    /// Log level, used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Cli {
    /// Build the run configuration: environment first, then command-line overrides
    pub fn config(&self) -> Result<Config, vocab_config::ConfigError> {
        let images = self.no_images.then_some(false);
        let mut config = Config::from_env(self.mode, images)?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(words) = &self.words {
            config.paths.words_file = words.clone();
        }
        if let Some(store) = &self.store {
            config.paths.store_file = store.clone();
        }
        if let Some(media_dir) = &self.media_dir {
            config.paths.media_dir = media_dir.clone();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is fine, variables may come from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_format);

    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    match sync::run_sync(&config).await {
        Ok(report) => {
            sync::log_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Sync failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
