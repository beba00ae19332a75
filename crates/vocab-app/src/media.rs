use std::fs;

use anyhow::{Context, Result};
use vocab_config::paths::PathsConfig;

/// Create the media subtrees downloads are written into
pub fn ensure_directories(paths: &PathsConfig) -> Result<()> {
    for dir in [paths.images_dir(), paths.audio_dir()] {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    tracing::info!("Directories are ready under {}", paths.media_dir.display());
    Ok(())
}
