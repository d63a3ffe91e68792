use anyhow::Result;
use config::{Config, Environment, File};
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::schemas::AppState;

/// Runtime settings.
///
/// Layered as built-in defaults, then `paycycle.toml` (or the file given with
/// `--config`), then environment variables such as `DATABASE_URL`. A `.env`
/// file is loaded into the environment first.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    /// Single allowed origin; any origin when unset
    pub cors_origin: Option<String>,
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://paycycle.db?mode=rwc".to_string(),
            bind_address: "0.0.0.0:5000".to_string(),
            cors_origin: None,
            cache_ttl_secs: 300,
            cache_capacity: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match config_path {
            Some(path) => File::with_name(path),
            None => File::with_name("paycycle").required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;

        debug!(?settings, "Loaded settings");
        Ok(settings)
    }
}

/// Connect to the database and build the shared state
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    let cache = Cache::builder()
        .max_capacity(settings.cache_capacity)
        .time_to_live(Duration::from_secs(settings.cache_ttl_secs))
        .build();

    Ok(AppState::new(db, cache))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_address, "0.0.0.0:5000");
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.cors_origin.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("paycycle-test-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "cors_origin = \"http://localhost:5173\"\ncache_capacity = 42\n",
        )
        .unwrap();

        let settings = Settings::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.cors_origin.as_deref(), Some("http://localhost:5173"));
        assert_eq!(settings.cache_capacity, 42);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(Settings::load(Some("/nonexistent/paycycle-settings.toml")).is_err());
    }
}
