use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vocab_config::text::TextApiConfig;
use vocab_enrich::{EnrichError, ProviderMetadata, TextEnricher, parse_word_details};
use vocab_types::WordDetails;

use crate::prompt::PromptTemplate;

#[derive(Clone)]
pub struct GeminiTextClient {
    client: reqwest::Client,
    api_key: String,
    url: String,
    template: PromptTemplate,
}

impl GeminiTextClient {
    pub fn new(config: &TextApiConfig, timeout: Duration) -> Result<Self, EnrichError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(config, client))
    }

    /// Build on top of an already configured HTTP client
    pub fn with_http_client(config: &TextApiConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            url: config.generate_url(),
            template: PromptTemplate::from_config(config),
        }
    }

    /// Send one prompt and return the model's reply text
    async fn generate(&self, prompt: String) -> Result<String, EnrichError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnrichError::from_status(response.status()));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            EnrichError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        body.into_text()
    }
}

#[async_trait]
impl TextEnricher for GeminiTextClient {
    async fn enrich(&self, word: &str) -> Result<WordDetails, EnrichError> {
        let reply = self.generate(self.template.format(word)).await?;
        let mut details = parse_word_details(&reply)?;

        // The store is keyed by the source word, not by whatever the model echoed
        if details.word != word {
            tracing::warn!("Model answered for '{}' instead of '{}'", details.word, word);
            details.word = word.to_string();
        }

        Ok(details)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Result<String, EnrichError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(EnrichError::EmptyResponse);
        }

        Ok(text)
    }
}
