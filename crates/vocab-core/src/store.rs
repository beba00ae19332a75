use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use vocab_types::VocabularyRecord;

use crate::error::StoreError;

/// JSON file holding the vocabulary records
pub struct VocabularyStore {
    path: PathBuf,
}

impl VocabularyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// logged and also treated as empty, so its content is lost on the next
    /// save.
    pub fn load(&self) -> Vec<VocabularyRecord> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Error loading {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let records: Vec<VocabularyRecord> = match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "Error loading {}: {}; starting from an empty vocabulary",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        dedup_records(records)
    }

    /// Write all records, replacing the file.
    ///
    /// Output goes to a sibling temp file first and is renamed over the
    /// target, so readers never see a half-written store.
    pub fn save(&self, records: &[VocabularyRecord]) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|source| StoreError::CreateDir {
            path: parent.clone(),
            source,
        })?;

        let bytes = to_pretty_json(records)?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vocabulary.json".to_string());
        let tmp_path = parent.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

        if let Err(source) = fs::write(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Write {
                path: tmp_path,
                source,
            });
        }

        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!("Saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// Four-space indented JSON, non-ASCII written as-is
fn to_pretty_json(records: &[VocabularyRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    Ok(buf)
}

/// Keep the first record for each word
fn dedup_records(records: Vec<VocabularyRecord>) -> Vec<VocabularyRecord> {
    let mut seen = HashSet::new();
    let total = records.len();

    let unique: Vec<VocabularyRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.word.clone()))
        .collect();

    if unique.len() < total {
        tracing::warn!(
            "Dropped {} duplicate vocabulary records",
            total - unique.len()
        );
    }

    unique
}
