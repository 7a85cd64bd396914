use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgriWaterError {
    #[error("Unknown {field}: '{value}'")]
    UnknownInput { field: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] polars::prelude::PolarsError),
}

impl AgriWaterError {
    pub fn unknown(field: &'static str, value: impl Into<String>) -> Self {
        AgriWaterError::UnknownInput {
            field,
            value: value.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AgriWaterError::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AgriWaterError>;
