use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Config entry {index} '{field}' must be >= 1.")]
    FieldMustBePositive { index: usize, field: &'static str },
    #[error("Config entry {index} lists no request keys.")]
    EmptyRequestKeys { index: usize },
    #[error("Config entry {index} has an empty request key in '{value}'.")]
    EmptyRequestKey { index: usize, value: String },
    #[error("Config entry {index} has an invalid inner_interval {value}.")]
    InvalidInterval { index: usize, value: f64 },
}
