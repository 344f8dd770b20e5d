//! Error types for DishaNav

use thiserror::Error;

/// DishaNav error type
#[derive(Error, Debug)]
pub enum DishaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Trace error: {0}")]
    Trace(String),

    #[error("Navigation error: {0}")]
    Navigation(#[from] marga::Error),
}

impl From<toml::de::Error> for DishaError {
    fn from(e: toml::de::Error) -> Self {
        DishaError::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for DishaError {
    fn from(e: serde_yaml::Error) -> Self {
        DishaError::Trace(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DishaError>;
