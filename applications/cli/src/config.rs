/// CLI configuration
use crate::error::{CliError, Result};
use encore_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `ENCORE_PLAYER__TICK_INTERVAL_MS`
pub const ENV_PREFIX: &str = "ENCORE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    /// JSON catalog to load instead of the built-in demo dataset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// File mirroring the recently-played log between runs
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        // Explicit path must exist; the default one is optional
        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("encore.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (ENCORE_ prefix, "__" between sections)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if let Some(path) = &self.catalog_path {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "catalog file not found at {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
