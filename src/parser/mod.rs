//! Request definition parsers (curl command text and raw HTTP text).
mod curl;
mod raw;
mod shell_words;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;

use crate::error::ParseError;
use crate::events::EventSink;
use crate::request::RequestModel;

/// File extension that selects the raw HTTP grammar.
pub const RAW_HTTP_EXTENSION: &str = "http";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Curl,
    RawHttp,
}

impl DefinitionKind {
    /// `.http` files are raw HTTP; everything else is read as a curl command.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(RAW_HTTP_EXTENSION) => DefinitionKind::RawHttp,
            _ => DefinitionKind::Curl,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DefinitionKind::Curl => "curl",
            DefinitionKind::RawHttp => "raw HTTP",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns definition text into [`RequestModel`]s.
#[derive(Debug, Clone, Default)]
pub struct DefinitionParser {
    events: EventSink,
}

impl DefinitionParser {
    #[must_use]
    pub const fn new(events: EventSink) -> Self {
        Self { events }
    }

    /// Parses `text` with the grammar selected by `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the text does not match the grammar.
    pub fn parse(
        &self,
        kind: DefinitionKind,
        text: &str,
        tag: &str,
    ) -> Result<RequestModel, ParseError> {
        match kind {
            DefinitionKind::Curl => self.parse_curl(text, tag),
            DefinitionKind::RawHttp => Self::parse_raw_http(text, tag),
        }
    }

    /// Parses a curl command. Headers without a colon are skipped and reported
    /// as [`crate::events::ReplayEvent::MalformedHeader`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingUrl`] when no URL can be found.
    pub fn parse_curl(&self, text: &str, tag: &str) -> Result<RequestModel, ParseError> {
        curl::parse_curl(text, tag, &self.events)
    }

    /// Parses a raw HTTP request.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the start line cannot be split off or is
    /// missing its method or URL.
    pub fn parse_raw_http(text: &str, tag: &str) -> Result<RequestModel, ParseError> {
        raw::parse_raw_http(text, tag)
    }
}
