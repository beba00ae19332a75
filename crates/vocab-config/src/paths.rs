use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::var_or;

fn default_words_file() -> String {
    "input/words.txt".to_string()
}

fn default_store_file() -> String {
    "output/vocabulary.json".to_string()
}

fn default_media_dir() -> String {
    "output/media".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Line-delimited word list
    pub words_file: PathBuf,
    /// JSON vocabulary store
    pub store_file: PathBuf,
    /// Root of the `images` and `audio` subtrees
    pub media_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            words_file: default_words_file().into(),
            store_file: default_store_file().into(),
            media_dir: default_media_dir().into(),
        }
    }
}

impl PathsConfig {
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            words_file: var_or(lookup, "WORDS_FILE", default_words_file).into(),
            store_file: var_or(lookup, "VOCABULARY_FILE", default_store_file).into(),
            media_dir: var_or(lookup, "MEDIA_DIR", default_media_dir).into(),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.media_dir.join("images")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.media_dir.join("audio")
    }
}
