//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// List view defaults.
    #[serde(default)]
    pub tables: TableConfig,
    /// Dashboard card sizes.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Which persistence backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile in-process store.
    Memory,
    /// Single JSON file on disk.
    #[default]
    Local,
    /// Postgres document table.
    Postgres,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
    /// File used by the local backend.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Connection URL used by the postgres backend.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/leadflow.json")
}

fn default_max_connections() -> u32 {
    10
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_path: default_data_path(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

/// List view defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Rows per page for every table.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    10
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Dashboard card sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Window for the executive leaderboard, in days.
    #[serde(default = "default_leaderboard_days")]
    pub leaderboard_days: u32,
    /// Entries in the leaderboard and fundraiser cards.
    #[serde(default = "default_top_count")]
    pub top_count: usize,
    /// Entries in the recent payments card.
    #[serde(default = "default_recent_payments")]
    pub recent_payments: usize,
}

fn default_leaderboard_days() -> u32 {
    7
}

fn default_top_count() -> usize {
    5
}

fn default_recent_payments() -> usize {
    15
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            leaderboard_days: default_leaderboard_days(),
            top_count: default_top_count(),
            recent_payments: default_recent_payments(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEADFLOW").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
