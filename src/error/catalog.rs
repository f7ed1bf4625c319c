use std::path::PathBuf;

use thiserror::Error;

use super::ParseError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read definition '{key}' from '{path}': {source}")]
    ReadDefinition {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse definition '{key}' from '{path}': {source}")]
    ParseDefinition {
        key: String,
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
