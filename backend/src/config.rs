//! Configuration management for the stock tracking service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with STK_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Google Sheets API configuration
    pub sheets: SheetsConfig,

    /// Sheet ranges read and written by the services
    pub ranges: RangeConfig,

    /// Stock settings cache configuration
    pub settings_cache: SettingsCacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetsConfig {
    /// Sheets API base URL
    pub base_url: String,

    /// Workbook shared by all front-ends
    pub spreadsheet_id: String,

    /// API key for read access
    pub api_key: String,

    /// Bearer token for write access, supplied externally
    pub access_token: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures
    pub max_retries: u32,

    /// Delay added per retry attempt, in milliseconds
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RangeConfig {
    pub inventory: String,
    pub settings: String,
    pub packing_transfers: String,
    pub raw_material_ledger: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SettingsCacheConfig {
    /// How long loaded stock settings stay fresh
    pub ttl_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("STK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("sheets.base_url", "https://sheets.googleapis.com/v4")?
            .set_default("sheets.api_key", "")?
            .set_default("sheets.timeout_secs", 15)?
            .set_default("sheets.max_retries", 2)?
            .set_default("sheets.retry_backoff_ms", 500)?
            .set_default("ranges.inventory", "Inventory!A:Z")?
            .set_default("ranges.settings", "Settings!A:Z")?
            .set_default("ranges.packing_transfers", "PackingTransfers!A:Z")?
            .set_default("ranges.raw_material_ledger", "RawMaterials!A:Z")?
            .set_default("settings_cache.ttl_secs", 300)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (STK_ prefix)
            .add_source(
                Environment::with_prefix("STK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            inventory: "Inventory!A:Z".to_string(),
            settings: "Settings!A:Z".to_string(),
            packing_transfers: "PackingTransfers!A:Z".to_string(),
            raw_material_ledger: "RawMaterials!A:Z".to_string(),
        }
    }
}
