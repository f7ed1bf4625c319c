use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult, ConfigError};
use crate::request::Headers;

use super::types::ConfigFile;

/// Config files looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["reqplay.json", "reqplay.toml"];

/// Loads the run configuration from `path` or the first default file found.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&Path>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return Ok(Some(load_config_file(path)?));
    }

    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            return Ok(Some(load_config_file(&candidate)?));
        }
    }

    Ok(None)
}

/// Loads a flat `name -> value` header map from a JSON or TOML file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not a string map.
pub fn load_header_overrides(path: &Path) -> AppResult<Headers> {
    load_file(path)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    load_file(path)
}

fn load_file<T>(path: &Path) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
