use thiserror::Error;

use crate::request::HttpMethod;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown request key '{key}'.")]
    UnknownRequestKey { key: String },
    #[error("HTTP method {method} of '{tag}' is not supported for sending.")]
    UnsupportedMethod { tag: String, method: HttpMethod },
    #[error("Transport failure for '{tag}': {source}")]
    Transport {
        tag: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request '{tag}' could not be built: {source}")]
    Request {
        tag: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid header name '{header}' for '{tag}': {source}")]
    InvalidHeaderName {
        tag: String,
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid value for header '{header}' of '{tag}': {source}")]
    InvalidHeaderValue {
        tag: String,
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Invalid URL '{url}' for '{tag}': {source}")]
    InvalidUrl {
        tag: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build transport session: {source}")]
    BuildSession {
        #[source]
        source: reqwest::Error,
    },
    #[error("Concurrent unit {unit} of entry {entry} aborted: {source}")]
    UnitAborted {
        entry: usize,
        unit: usize,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("{failed} of {total} concurrent units stopped with an error.")]
    UnitsFailed { failed: usize, total: usize },
}
