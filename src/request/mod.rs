//! Canonical in-memory form of one request definition.
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ParseError;


/// Header name to value. Names keep the exact case they were parsed with.
pub type Headers = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(ParseError::UnknownMethod {
                method: s.to_owned(),
            }),
        }
    }
}

/// One parsed request definition.
///
/// Produced once by a parser and shared read-only afterwards; the requester
/// works on its own copy of the headers and URL for every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestModel {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    pub tag: String,
}

/// Looks up a header by exact name, falling back to a case-insensitive match.
pub(crate) fn find_header<'map>(headers: &'map Headers, name: &str) -> Option<&'map str> {
    if let Some(value) = headers.get(name) {
        return Some(value.as_str());
    }
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Splits a `Name: value` line on its first colon, trimming both halves.
pub(crate) fn split_header_line(line: &str) -> Option<(String, String)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
}
