//! Configuration loading for the demo binary.

use std::{fs, path::Path};

use driftworld_engine::StreamingConfig;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/driftworld.toml";

/// Load streaming configuration from the default path.
pub fn load() -> StreamingConfig {
    load_from_path(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load configuration from an explicit path, falling back to defaults on errors.
pub fn load_from_path(path: &Path) -> StreamingConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<StreamingConfig>(&contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                StreamingConfig::default()
            }
        },
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else {
                warn!(
                    "Streaming config not found at {}. Using defaults",
                    path.display()
                );
            }
            StreamingConfig::default()
        }
    }
}
