use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::image::ImageApiConfig;
use self::paths::PathsConfig;
use self::text::TextApiConfig;

pub mod image;
pub mod paths;
pub mod text;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Persistence policy for one pipeline invocation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Append words missing from the store, leave existing records alone
    #[default]
    Merge,
    /// Enrich every source word and overwrite the store with the result
    Replace,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Merge => "merge",
            SyncMode::Replace => "replace",
        }
    }

    pub fn needs_enrichment(&self) -> bool {
        matches!(self, SyncMode::Replace)
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_images_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub mode: SyncMode,
    pub paths: PathsConfig,
    /// Per-request timeout for every external call
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_images_enabled")]
    pub images_enabled: bool,
    /// Present only in replace mode
    pub text: Option<TextApiConfig>,
    /// Present only in replace mode with images enabled
    pub image: Option<ImageApiConfig>,
}

impl Config {
    /// Build the configuration from process environment.
    ///
    /// `images` overrides `ENABLE_IMAGES` when set.
    pub fn from_env(mode: SyncMode, images: Option<bool>) -> Result<Self, ConfigError> {
        Self::from_vars(mode, images, |name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an explicit variable source
    pub fn from_vars<F>(mode: SyncMode, images: Option<bool>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_seconds =
            parse_var(&lookup, "TIMEOUT_SECONDS")?.unwrap_or_else(default_timeout_seconds);

        let images_enabled = match images {
            Some(enabled) => enabled,
            None => parse_bool(&lookup, "ENABLE_IMAGES")?.unwrap_or_else(default_images_enabled),
        };

        let (text, image) = if mode.needs_enrichment() {
            let text = TextApiConfig::from_vars(&lookup)?;
            let image = if images_enabled {
                Some(ImageApiConfig::from_vars(&lookup)?)
            } else {
                None
            };
            (Some(text), image)
        } else {
            (None, None)
        };

        Ok(Config {
            mode,
            paths: PathsConfig::from_vars(&lookup),
            timeout_seconds,
            images_enabled,
            text,
            image,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Read a required, non-blank variable
pub(crate) fn required_var<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

pub(crate) fn var_or<F>(lookup: &F, name: &str, default: impl FnOnce() -> String) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(default)
}

pub(crate) fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        _ => Ok(None),
    }
}

fn parse_bool<F>(lookup: &F, name: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue { name, value }),
        },
    }
}
