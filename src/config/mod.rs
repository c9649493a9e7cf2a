use serde::Deserialize;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::contour::RegionPolicy;

pub mod error;
pub use error::ConfigError;

pub mod format;
pub use format::VectorFormat;

fn default_persist() -> bool {
    true
}

/// Run configuration, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the 0/1 membership raster produced by the delineation step.
    mask: String,
    /// Directory for persisted polygons; random names in the working
    /// directory when absent.
    results: Option<String>,
    vector_extension: VectorFormat,
    #[serde(default)]
    region_policy: RegionPolicy,
    #[serde(default = "default_persist")]
    persist: bool,
    #[serde(default)]
    verbose: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        if config.mask.trim().is_empty() {
            return Err(ConfigError::EmptyMaskPath);
        }

        Ok(config)
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn vector_extension(&self) -> VectorFormat {
        self.vector_extension
    }

    pub fn region_policy(&self) -> RegionPolicy {
        self.region_policy
    }

    pub fn persist(&self) -> bool {
        self.persist
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Output path (without extension) under the results directory, named
    /// after the mask file. None when no results directory is configured.
    pub fn save_path(&self) -> Option<PathBuf> {
        let results = self.results.as_ref()?;
        let stem = Path::new(&self.mask)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "catchment".to_string());

        Some(Path::new(results).join(stem))
    }
}
