use std::path::PathBuf;

use vocab_types::WordDetails;

pub mod normalize;
pub mod sanitize;

pub use normalize::{parse_word_details, strip_wrapping};
pub use sanitize::{image_file_name, sanitize_file_stem};

/// Text enrichment provider interface
#[async_trait::async_trait]
pub trait TextEnricher: Send + Sync {
    /// Generate translation, example sentence and image prompt for a word
    async fn enrich(&self, word: &str) -> Result<WordDetails, EnrichError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Image enrichment provider interface
#[async_trait::async_trait]
pub trait ImageEnricher: Send + Sync {
    /// Generate an image and return the remote locator it can be fetched from
    async fn generate(&self, prompt: &str) -> Result<String, EnrichError>;

    /// Download a generated image into local storage.
    ///
    /// `name_hint` is sanitized into the stored file name.
    async fn download(&self, locator: &str, name_hint: &str) -> Result<PathBuf, EnrichError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl EnrichError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => EnrichError::AuthenticationError,
            429 => EnrichError::RateLimitExceeded,
            _ => EnrichError::ApiError(format!("HTTP {}", status)),
        }
    }
}
