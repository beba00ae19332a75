use serde::{Deserialize, Serialize};

use crate::{ConfigError, parse_var, required_var, var_or};

fn default_api_url() -> String {
    "https://gateway.pixazo.ai/flux-1-schnell/v1/getData".to_string()
}

fn default_num_steps() -> u32 {
    4
}

fn default_seed() -> u64 {
    15
}

fn default_size() -> u32 {
    512
}

/// Credentials and generation parameters for the Pixazo image API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageApiConfig {
    pub subscription_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_num_steps")]
    pub num_steps: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
}

impl ImageApiConfig {
    pub fn from_vars<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            subscription_key: required_var(lookup, "PIXAZO_SUBSCRIPTION_KEY")?,
            api_url: var_or(lookup, "PIXAZO_API_URL", default_api_url),
            num_steps: parse_var(lookup, "PIXAZO_NUM_STEPS")?.unwrap_or_else(default_num_steps),
            seed: parse_var(lookup, "PIXAZO_SEED")?.unwrap_or_else(default_seed),
            width: parse_var(lookup, "PIXAZO_WIDTH")?.unwrap_or_else(default_size),
            height: parse_var(lookup, "PIXAZO_HEIGHT")?.unwrap_or_else(default_size),
        })
    }
}
