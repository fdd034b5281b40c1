use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Environment variable prefix, e.g. `PRICES__BIRDEYE__API_KEY`
pub const ENV_PREFIX: &str = "PRICES";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// General settings shared by the binaries
    pub system: SystemSettings,

    /// BirdEye API configuration (multi-price and token overview)
    pub birdeye: BirdEyeConfig,

    /// DexScreener API configuration (per-token pair listings)
    pub dexscreener: DexScreenerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSettings {
    /// Enable debug mode
    pub debug_mode: bool,

    /// Default tracing filter when RUST_LOG is not set
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdEyeConfig {
    /// BirdEye API key, sent as X-API-KEY
    pub api_key: String,

    /// BirdEye API base URL
    pub api_base_url: String,

    /// Chain identifier sent as x-chain
    pub chain: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerConfig {
    /// DexScreener API base URL
    pub api_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Upper bound on concurrent per-token requests in bulk fetches
    pub max_concurrent_requests: usize,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_filter: "info".to_string(),
        }
    }
}

impl Default for BirdEyeConfig {
    fn default() -> Self {
        Self {
            api_key: "".to_string(), // Must be set in config.toml or PRICES__BIRDEYE__API_KEY
            api_base_url: "https://public-api.birdeye.so".to_string(),
            chain: "solana".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.dexscreener.com".to_string(),
            request_timeout_seconds: 30,
            max_concurrent_requests: 4,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            system: SystemSettings::default(),
            birdeye: BirdEyeConfig::default(),
            dexscreener: DexScreenerConfig::default(),
        }
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<()> {
    url::Url::parse(value).map_err(|e| {
        ConfigurationError::InvalidValue(format!("{} base URL '{}' is invalid: {}", name, value, e))
    })?;
    Ok(())
}

impl BirdEyeConfig {
    /// Validate BirdEye configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "birdeye.api_key is required (or set PRICES__BIRDEYE__API_KEY)".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "birdeye.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.chain.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "BirdEye chain cannot be empty".to_string(),
            ));
        }

        validate_base_url("BirdEye", &self.api_base_url)
    }
}

impl DexScreenerConfig {
    /// Validate DexScreener configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "dexscreener.request_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrent_requests == 0 {
            return Err(ConfigurationError::InvalidValue(
                "dexscreener.max_concurrent_requests must be greater than 0".to_string(),
            ));
        }

        validate_base_url("DexScreener", &self.api_base_url)
    }
}

impl SystemConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config.toml")
    }

    /// Load and validate configuration from a specific file path
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let system_config = Self::read_from_path(config_path)?;
        system_config.validate()?;
        Ok(system_config)
    }

    /// Merge defaults, the optional file and the environment without
    /// validating, so callers can decide which sections they need.
    pub fn read_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config_builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&SystemConfig::default())?);

        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .separator("__"),
        );

        Ok(config_builder.build()?.try_deserialize()?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.birdeye.validate()?;
        self.dexscreener.validate()?;
        Ok(())
    }

    /// Configuration as JSON with the BirdEye key masked
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut redacted = self.clone();
        if !redacted.birdeye.api_key.is_empty() {
            redacted.birdeye.api_key = "***".to_string();
        }
        serde_json::to_value(redacted).unwrap_or(serde_json::Value::Null)
    }
}
