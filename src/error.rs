use crate::types::snapshot::DriverType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("invalid snapshot: missing {0} driver snapshot")]
    MissingDriver(DriverType),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("formula integrity violation: {0}")]
    FormulaIntegrity(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
