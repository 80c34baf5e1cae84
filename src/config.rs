use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::track::Extent;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub extent: Extent,
    #[serde(default = "default_width")]
    pub width: u32,
    pub output: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub land_geojson: PathBuf,
    /// WSRA observation CSVs keyed by canonical storm name. A BTreeMap keeps
    /// legend order deterministic.
    #[serde(default)]
    pub wsra_tracks: BTreeMap<String, PathBuf>,
    /// CSV column whose values drive per-point coloring, if any.
    pub value_column: Option<String>,
    pub best_track: Option<BestTrackConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BestTrackConfig {
    pub points: PathBuf,
    pub path: PathBuf,
    pub windswath: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            dir: PathBuf::from(".wsra_store"),
        }
    }
}

fn default_width() -> u32 {
    1200
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml` from the current working directory. Re-reads the
    /// file on every call; nothing is cached.
    pub fn load() -> Result<Self> {
        Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE))
    }
}
