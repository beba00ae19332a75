use vocab_config::text::TextApiConfig;

/// Prompt sent to the text model for each word
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub target_language: String,
    pub sentence_level: String,
}

impl PromptTemplate {
    pub fn new(target_language: String, sentence_level: String) -> Self {
        Self {
            target_language,
            sentence_level,
        }
    }

    pub fn from_config(config: &TextApiConfig) -> Self {
        Self::new(
            config.target_language.clone(),
            config.sentence_level.clone(),
        )
    }

    /// Format the prompt for one word
    pub fn format(&self, word: &str) -> String {
        format!(
            r#"You are an English Language Teacher. For the word '{word}', return a VALID JSON object ONLY.
Do not use Markdown formatting, no code blocks, no backticks.
Return exactly this structure:
{{
    "word": "{word}",
    "translation": "{language} translation of the word",
    "sentence": "A simple {level}-level English sentence using the word (3-7 words)",
    "image_prompt": "A specific visual description for an AI image generator, minimalist vector art style, no text"
}}"#,
            word = word,
            language = self.target_language,
            level = self.sentence_level,
        )
    }
}
