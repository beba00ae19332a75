//! Word list → vocabulary store synchronization.
//!
//! Words are handled strictly one after another, in source order. Each
//! external call is awaited before the next one starts, and the store is
//! written exactly once at the end of a run.

use std::collections::HashSet;
use std::path::PathBuf;

use vocab_config::SyncMode;
use vocab_enrich::{EnrichError, ImageEnricher, TextEnricher};
use vocab_types::{VocabularyRecord, WordDetails, WordToken};

use crate::error::PipelineError;
use crate::store::VocabularyStore;

/// External clients used in replace mode
#[derive(Clone, Copy)]
pub struct Enrichers<'a> {
    pub text: &'a dyn TextEnricher,
    /// `None` disables image generation
    pub image: Option<&'a dyn ImageEnricher>,
}

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub words_read: usize,
    /// Records created in this run
    pub added: usize,
    /// Merge mode: words already present in the store
    pub unchanged: usize,
    /// Replace mode: repeated source words processed only once
    pub duplicates: usize,
    /// Replace mode: words dropped because text enrichment failed
    pub skipped: Vec<String>,
    /// Replace mode: words kept without an image
    pub image_failures: Vec<String>,
    /// Records written to the store
    pub total_records: usize,
}

enum Strategy<'a> {
    Merge,
    Replace(Enrichers<'a>),
}

pub struct Pipeline<'a> {
    store: VocabularyStore,
    strategy: Strategy<'a>,
}

impl<'a> Pipeline<'a> {
    /// Pipeline for `mode`; replace mode fails without enrichers.
    ///
    /// Enrichers passed in merge mode are not used.
    pub fn new(
        mode: SyncMode,
        store: VocabularyStore,
        enrichers: Option<Enrichers<'a>>,
    ) -> Result<Self, PipelineError> {
        let strategy = match (mode, enrichers) {
            (SyncMode::Merge, _) => Strategy::Merge,
            (SyncMode::Replace, Some(enrichers)) => Strategy::Replace(enrichers),
            (SyncMode::Replace, None) => return Err(PipelineError::MissingTextClient),
        };

        Ok(Self { store, strategy })
    }

    pub fn mode(&self) -> SyncMode {
        match self.strategy {
            Strategy::Merge => SyncMode::Merge,
            Strategy::Replace(_) => SyncMode::Replace,
        }
    }

    /// Process `words` and persist the result.
    ///
    /// Only a failed store write is returned as an error; every other
    /// failure is logged and recorded in the report.
    pub async fn run(&self, words: &[WordToken]) -> Result<SyncReport, PipelineError> {
        let mut report = SyncReport {
            mode: self.mode(),
            words_read: words.len(),
            ..SyncReport::default()
        };

        let records = match self.strategy {
            Strategy::Merge => self.merge_append(words, &mut report),
            Strategy::Replace(enrichers) => enrich_all(words, enrichers, &mut report).await,
        };

        report.total_records = records.len();
        self.store.save(&records)?;

        tracing::info!(
            "Data saved to {}. Total words: {}",
            self.store.path().display(),
            records.len()
        );

        Ok(report)
    }

    /// Append a bare record for every word not yet in the store
    fn merge_append(
        &self,
        words: &[WordToken],
        report: &mut SyncReport,
    ) -> Vec<VocabularyRecord> {
        let mut records = self.store.load();
        let mut existing: HashSet<String> = records.iter().map(|r| r.word.clone()).collect();

        for word in words {
            if existing.contains(word.as_str()) {
                tracing::debug!("'{}' already in vocabulary", word);
                report.unchanged += 1;
                continue;
            }

            records.push(VocabularyRecord::unenriched(word));
            existing.insert(word.to_string());
            report.added += 1;
            tracing::info!("Added '{}'", word);
        }

        if report.added > 0 {
            tracing::info!("Added {} new words to vocabulary", report.added);
        }

        records
    }
}

/// Enrich every word from scratch; the store's old content is ignored
async fn enrich_all(
    words: &[WordToken],
    enrichers: Enrichers<'_>,
    report: &mut SyncReport,
) -> Vec<VocabularyRecord> {
    let total = distinct_count(words);
    let mut records = Vec::with_capacity(total);
    let mut seen: HashSet<&str> = HashSet::new();

    for word in words {
        if !seen.insert(word.as_str()) {
            tracing::debug!("'{}' repeated in word list, already processed", word);
            report.duplicates += 1;
            continue;
        }

        tracing::info!("[{}/{}] Processing '{}'", seen.len(), total, word);

        let mut details = match enrichers.text.enrich(word).await {
            Ok(details) => details,
            Err(e) => {
                tracing::error!(
                    "{} enrichment failed for '{}': {}; skipping",
                    enrichers.text.metadata().name,
                    word,
                    e
                );
                report.skipped.push(word.to_string());
                continue;
            }
        };

        // Records and image files are keyed by the source word
        if details.word != word.as_str() {
            tracing::warn!(
                "{} answered for '{}' instead of '{}'",
                enrichers.text.metadata().name,
                details.word,
                word
            );
            details.word = word.to_string();
        }

        let image_path = match illustrate(&details, enrichers.image).await {
            Ok(Some(path)) => path.to_string_lossy().into_owned(),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("Image failed for '{}': {}", word, e);
                report.image_failures.push(word.to_string());
                String::new()
            }
        };

        records.push(VocabularyRecord::enriched(details, image_path));
        report.added += 1;
    }

    tracing::info!(
        "Enriched {} of {} words ({} skipped, {} without image)",
        report.added,
        total,
        report.skipped.len(),
        report.image_failures.len()
    );

    records
}

/// Number of different words, i.e. how many a replace run processes
fn distinct_count(words: &[WordToken]) -> usize {
    words.iter().map(WordToken::as_str).collect::<HashSet<_>>().len()
}

/// Generate and download an image for the word, if there is a prompt and a client
async fn illustrate(
    details: &WordDetails,
    image: Option<&dyn ImageEnricher>,
) -> Result<Option<PathBuf>, EnrichError> {
    let (Some(client), Some(prompt)) = (image, details.image_prompt()) else {
        return Ok(None);
    };

    let locator = client.generate(prompt).await?;
    let path = client.download(&locator, &details.word).await?;
    tracing::info!("Image for '{}' saved to {}", details.word, path.display());

    Ok(Some(path))
}
