use serde::{Deserialize, Serialize};

use crate::{ConfigError, required_var, var_or};

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_target_language() -> String {
    "Arabic".to_string()
}

fn default_sentence_level() -> String {
    "A2".to_string()
}

/// Credentials and prompt settings for the Gemini text API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextApiConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Language the translation is written in
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// CEFR level of the example sentence
    #[serde(default = "default_sentence_level")]
    pub sentence_level: String,
}

impl TextApiConfig {
    pub fn from_vars<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_key: required_var(lookup, "GEMINI_API_KEY")?,
            model: var_or(lookup, "GEMINI_MODEL", default_model),
            api_url: var_or(lookup, "GEMINI_API_URL", default_api_url),
            target_language: var_or(lookup, "TARGET_LANGUAGE", default_target_language),
            sentence_level: var_or(lookup, "SENTENCE_LEVEL", default_sentence_level),
        })
    }

    /// Full `generateContent` endpoint for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url() {
        let config = TextApiConfig::from_vars(&|name: &str| match name {
            "GEMINI_API_KEY" => Some("key".to_string()),
            "GEMINI_API_URL" => Some("http://localhost:9000/v1beta/".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(
            config.generate_url(),
            "http://localhost:9000/v1beta/models/gemini-3-flash-preview:generateContent"
        );
        assert_eq!(config.target_language, "Arabic");
    }
}
