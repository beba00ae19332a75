//! Turning raw model output into a validated [`WordDetails`].
//!
//! Models asked for bare JSON still wrap it in Markdown code fences now and
//! then. Known wrapping markers are stripped first; whatever remains must
//! parse as a complete [`WordDetails`] or the call counts as failed.

use vocab_types::WordDetails;

use crate::EnrichError;

const FENCE: &str = "```";
const FENCE_LANGS: [&str; 2] = ["json", "JSON"];

/// Strip surrounding whitespace and Markdown code fences
pub fn strip_wrapping(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = FENCE_LANGS
            .iter()
            .find_map(|lang| rest.strip_prefix(lang))
            .unwrap_or(rest);
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Parse a text-model reply into word details
pub fn parse_word_details(raw: &str) -> Result<WordDetails, EnrichError> {
    let cleaned = strip_wrapping(raw);
    if cleaned.is_empty() {
        return Err(EnrichError::EmptyResponse);
    }

    let details: WordDetails = serde_json::from_str(cleaned)
        .map_err(|e| EnrichError::MalformedResponse(e.to_string()))?;

    if details.word.trim().is_empty() {
        return Err(EnrichError::MalformedResponse(
            "response has an empty `word` field".to_string(),
        ));
    }

    Ok(details)
}
