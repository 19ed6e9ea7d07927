use crate::clients::nominatim::DEFAULT_GEOCODER_URL;
use crate::clients::spotify::DEFAULT_SPOTIFY_API_URL;
use crate::error::AppError;
use crate::fs_manager::PortablePathManager;
use crate::recommendations::DEFAULT_FALLBACK_DELAY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use validator::{Validate, ValidationError};

fn validate_url(value: &str) -> Result<(), ValidationError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_url"))
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    #[validate(length(max = 64))]
    pub user_name: Option<String>,
    /// Bearer token for the music service. Enrichment is skipped without it.
    pub spotify_token: Option<String>,
    #[validate(custom(function = "validate_url"))]
    pub spotify_api_url: String,
    #[validate(custom(function = "validate_url"))]
    pub geocoder_url: String,
    pub fallback_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PortablePathManager::default_data_dir(),
            user_name: None,
            spotify_token: None,
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            fallback_delay_ms: DEFAULT_FALLBACK_DELAY.as_millis() as u64,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Loads `.env` if present, then reads the environment.
    pub fn load() -> Result<Self, AppError> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded environment from .env");
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let fallback_delay_ms = match non_empty_var("FALLBACK_DELAY_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "FALLBACK_DELAY_MS must be a number of milliseconds, got '{}'",
                    raw
                ))
            })?,
            None => defaults.fallback_delay_ms,
        };

        let config = Self {
            data_dir: non_empty_var("MINDMOSAIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            user_name: non_empty_var("MINDMOSAIC_USER_NAME"),
            spotify_token: non_empty_var("SPOTIFY_TOKEN"),
            spotify_api_url: non_empty_var("SPOTIFY_API_URL").unwrap_or(defaults.spotify_api_url),
            geocoder_url: non_empty_var("GEOCODER_URL").unwrap_or(defaults.geocoder_url),
            fallback_delay_ms,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}
