use thiserror::Error;

#[derive(Error, Debug)]
pub enum StampedeError {
    #[error("Feature path not found: {0}")]
    FeatureNotFound(String),

    #[error("No feature files found in: {0}")]
    NoFeaturesFound(String),

    #[error("Failed to parse feature file {path}: {message}")]
    FeatureParse { path: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StampedeError>;
