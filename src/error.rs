use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosefitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Genome error: {0}")]
    Genome(String),

    #[error("Observation error: {0}")]
    Observation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PosefitError>;
