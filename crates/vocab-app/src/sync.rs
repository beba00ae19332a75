use anyhow::{Context, Result};
use vocab_config::{Config, SyncMode};
use vocab_core::{Enrichers, Pipeline, SyncReport, VocabularyStore, read_words};
use vocab_enrich::{ImageEnricher, TextEnricher};
use vocab_provider_gemini::GeminiTextClient;
use vocab_provider_pixazo::PixazoImageClient;

use crate::media::ensure_directories;

/// One full run: provision directories, read words, run the selected pipeline
pub async fn run_sync(config: &Config) -> Result<SyncReport> {
    ensure_directories(&config.paths)?;

    let words = read_words(&config.paths.words_file);
    let store = VocabularyStore::new(config.paths.store_file.clone());

    tracing::info!(
        "Running {} sync of {} words into {}",
        config.mode.as_str(),
        words.len(),
        store.path().display()
    );

    let text = match (&config.text, config.mode.needs_enrichment()) {
        (Some(text_config), true) => Some(
            GeminiTextClient::new(text_config, config.request_timeout())
                .context("Failed to build text client")?,
        ),
        _ => None,
    };

    let image = match &config.image {
        Some(image_config) if text.is_some() && config.images_enabled => Some(
            PixazoImageClient::new(
                image_config,
                config.paths.images_dir(),
                config.request_timeout(),
            )
            .context("Failed to build image client")?,
        ),
        _ => None,
    };

    if let Some(text) = &text {
        tracing::info!(
            "Text provider: {}, image provider: {}",
            text.metadata().name,
            image
                .as_ref()
                .map(|client| client.metadata().name)
                .unwrap_or_else(|| "disabled".to_string())
        );
    }

    let enrichers = text.as_ref().map(|text| Enrichers {
        text: text as &dyn TextEnricher,
        image: image.as_ref().map(|client| client as &dyn ImageEnricher),
    });
    let pipeline = Pipeline::new(config.mode, store, enrichers)?;
    let report = pipeline.run(&words).await?;

    Ok(report)
}

pub fn log_summary(report: &SyncReport) {
    match report.mode {
        SyncMode::Merge => tracing::info!(
            "Done: {} words read, {} added, {} already present, {} total",
            report.words_read,
            report.added,
            report.unchanged,
            report.total_records
        ),
        SyncMode::Replace => {
            tracing::info!(
                "Done: {} words read, {} enriched, {} skipped, {} without image, {} total",
                report.words_read,
                report.added,
                report.skipped.len(),
                report.image_failures.len(),
                report.total_records
            );
            if !report.skipped.is_empty() {
                tracing::warn!("Skipped words: {}", report.skipped.join(", "));
            }
        }
    }
}
