use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A single word read from the word source: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordToken(String);

impl WordToken {
    /// Trim the input and reject it if nothing is left
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for WordToken {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted state of one vocabulary word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct VocabularyRecord {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Keys this crate does not know about, kept so rewrites don't drop them
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// On-disk shape of a record, before the legacy `example` key is resolved
#[derive(Deserialize)]
struct StoredRecord {
    word: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    sentence: Option<String>,
    #[serde(default)]
    example: Option<String>,
    #[serde(default)]
    image_prompt: Option<String>,
    #[serde(default)]
    image_path: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl From<StoredRecord> for VocabularyRecord {
    /// Older stores wrote the sentence as `example`. It is only used when
    /// `sentence` is absent; otherwise it is kept as an unknown key.
    fn from(stored: StoredRecord) -> Self {
        let mut extra = stored.extra;
        let sentence = match (stored.sentence, stored.example) {
            (Some(sentence), Some(example)) => {
                extra.insert("example".to_string(), example.into());
                sentence
            }
            (Some(sentence), None) => sentence,
            (None, example) => example.unwrap_or_default(),
        };

        Self {
            word: stored.word,
            translation: stored.translation,
            sentence,
            image_prompt: stored.image_prompt,
            image_path: stored.image_path,
            extra,
        }
    }
}

impl VocabularyRecord {
    /// Record for a word that has been seen but not enriched yet
    pub fn unenriched(word: &WordToken) -> Self {
        Self {
            word: word.to_string(),
            translation: String::new(),
            sentence: String::new(),
            image_prompt: None,
            image_path: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Record built from a text enrichment result.
    ///
    /// `image_path` is empty when image generation was skipped or failed.
    pub fn enriched(details: WordDetails, image_path: String) -> Self {
        Self {
            word: details.word,
            translation: details.translation,
            sentence: details.sentence,
            image_prompt: Some(details.image_prompt.unwrap_or_default()),
            image_path: Some(image_path),
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_enriched(&self) -> bool {
        !self.translation.is_empty() || !self.sentence.is_empty()
    }
}

/// Validated output of a text enrichment call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetails {
    pub word: String,
    pub translation: String,
    pub sentence: String,
    #[serde(default)]
    pub image_prompt: Option<String>,
}

impl WordDetails {
    /// Image prompt, if the model produced a usable one
    pub fn image_prompt(&self) -> Option<&str> {
        self.image_prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_token_trims_and_rejects_blank() {
        assert_eq!(WordToken::parse("  apple \t").unwrap().as_str(), "apple");
        assert!(WordToken::parse("   ").is_none());
        assert!(WordToken::parse("").is_none());
    }

    #[test]
    fn test_record_accepts_legacy_example_key() {
        let json = r#"{"word": "cat", "translation": "قطة", "example": "The cat sleeps."}"#;
        let record: VocabularyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.sentence, "The cat sleeps.");
        assert_eq!(record.translation, "قطة");
        assert!(record.image_prompt.is_none());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_record_with_sentence_and_example_keeps_both() {
        let json = r#"{"word": "cat", "sentence": "A cat.", "example": "old"}"#;
        let record: VocabularyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.sentence, "A cat.");
        assert_eq!(record.extra.get("example").and_then(|v| v.as_str()), Some("old"));

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["sentence"], "A cat.");
        assert_eq!(written["example"], "old");

        let reread: VocabularyRecord = serde_json::from_value(written).unwrap();
        assert_eq!(reread, record);
    }

    #[test]
    fn test_record_keeps_unknown_keys() {
        let json = r#"{"word": "cat", "audio_path": "output/media/audio/cat.mp3"}"#;
        let record: VocabularyRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.translation, "");
        assert_eq!(
            record.extra.get("audio_path").and_then(|v| v.as_str()),
            Some("output/media/audio/cat.mp3")
        );

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["audio_path"], "output/media/audio/cat.mp3");
        assert!(written.get("image_path").is_none());
    }

    #[test]
    fn test_unenriched_record_is_distinguishable() {
        let token = WordToken::parse("dog").unwrap();
        let record = VocabularyRecord::unenriched(&token);

        assert_eq!(record.word, "dog");
        assert!(!record.is_enriched());
    }

    #[test]
    fn test_word_details_requires_translation_and_sentence() {
        let missing = r#"{"word": "cat", "translation": "قطة"}"#;
        assert!(serde_json::from_str::<WordDetails>(missing).is_err());

        let ok = r#"{"word": "cat", "translation": "قطة", "sentence": "I see a cat."}"#;
        let details: WordDetails = serde_json::from_str(ok).unwrap();
        assert_eq!(details.image_prompt(), None);
    }

    #[test]
    fn test_blank_image_prompt_counts_as_absent() {
        let details = WordDetails {
            word: "cat".into(),
            translation: "قطة".into(),
            sentence: "I see a cat.".into(),
            image_prompt: Some("  ".into()),
        };
        assert_eq!(details.image_prompt(), None);

        let record = VocabularyRecord::enriched(details, String::new());
        assert_eq!(record.image_prompt.as_deref(), Some("  "));
        assert_eq!(record.image_path.as_deref(), Some(""));
    }
}
