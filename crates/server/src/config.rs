use std::path::PathBuf;

use serde::Deserialize;

use crate::cache::DataPaths;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "FEED_";

/// Server configuration loaded from `FEED_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Warm catalog with view history
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Square item-to-item similarity matrix (`.npy` or headerless `.csv`)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Cold-start catalog with mood labels
    #[serde(default = "default_cold_start_path")]
    pub cold_start_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Reload data files when their modification time changes
    #[serde(default = "default_reload_on_change")]
    pub reload_on_change: bool,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./CONTENT_based_filtering.csv")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("./similarity_matrix.npy")
}

fn default_cold_start_path() -> PathBuf {
    PathBuf::from("./completed_data_for_cold_start.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_reload_on_change() -> bool {
    true
}

impl Config {
    /// Load configuration from the environment, after an optional `.env`
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from explicit `(key, value)` pairs
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths {
            catalog: self.catalog_path.clone(),
            similarity: self.similarity_path.clone(),
            cold_start: self.cold_start_path.clone(),
        }
    }
}
