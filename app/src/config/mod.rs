//! Configuration management for the Progress Tracker app
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: PT__)

use anyhow::Result;
use progress_tracker_shared::{DisplayOrder, WeightUnit};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Hosted backend endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackendConfig {
    /// Realtime database root, e.g. `https://my-app.firebaseio.com`
    #[validate(url)]
    pub database_url: String,
    /// Storage bucket root, e.g. `https://firebasestorage.googleapis.com/v0/b/my-app.appspot.com`
    #[validate(url)]
    pub storage_url: String,
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Signed-in user credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Never written back out when the config is serialized
    #[serde(default, skip_serializing)]
    pub id_token: Option<SecretString>,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Report screen settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    pub display_order: DisplayOrder,
    pub weight_unit: WeightUnit,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            display_order: DisplayOrder::NewestFirst,
            weight_unit: WeightUnit::Kg,
        }
    }
}

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub weight_unit: WeightUnit,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Lbs,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                database_url: "http://localhost:9000".to_string(),
                storage_url: "http://localhost:9199/v0/b/progress-tracker.appspot.com".to_string(),
                request_timeout_secs: 30,
            },
            auth: AuthConfig::default(),
            reports: ReportsConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with PT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(
                config::File::with_name(&config_file)
                    .required(false)
            )
            // Override with environment variables (PT__ prefix)
            // e.g., PT__AUTH__ID_TOKEN sets auth.id_token
            .add_source(
                config::Environment::with_prefix("PT")
                    .separator("__")
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
