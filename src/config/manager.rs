use super::{
    evolution::{AffineOptimizerConfig, CorrectionOptimizerConfig},
    traits::ConfigSection,
};
use crate::error::PosefitError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `POSEFIT_AFFINE__GENERATIONS=8`.
pub const ENV_PREFIX: &str = "POSEFIT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub affine: AffineOptimizerConfig,
    pub correction: CorrectionOptimizerConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PosefitError> {
        self.affine.validate()?;
        self.correction.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PosefitError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PosefitError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)?;
        self.replace(config)
    }

    /// Loads `path` if it exists, then applies `POSEFIT_*` environment overrides.
    pub fn load_layered<P: AsRef<Path>>(&self, path: P) -> Result<(), PosefitError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PosefitError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| PosefitError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| PosefitError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, PosefitError> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| PosefitError::Configuration("Config lock poisoned".to_string()))
    }

    /// Applies `f` to a copy and commits it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), PosefitError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get()?;
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), PosefitError> {
        config.validate()?;
        let mut guard = self
            .config
            .write()
            .map_err(|_| PosefitError::Configuration("Config lock poisoned".to_string()))?;
        *guard = config;
        Ok(())
    }
}
