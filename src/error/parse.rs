use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No URL found in curl command.")]
    MissingUrl,
    #[error("Request text has no line break after the start line.")]
    MissingLineBreak,
    #[error("Start line '{line}' must contain a method and a URL.")]
    IncompleteStartLine { line: String },
    #[error("Unsupported HTTP method '{method}'.")]
    UnknownMethod { method: String },
}
