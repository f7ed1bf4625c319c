use std::path::PathBuf;

use clap::Parser;

use crate::request::Headers;

use super::parsers::parse_header;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Replay raw HTTP and curl request definitions against live endpoints with configurable concurrency, repetition, and staggering."
)]
pub struct ReplayArgs {
    /// Run configuration file (.json or .toml); defaults to reqplay.json or reqplay.toml
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Proxy URL used for every request
    #[arg(long, short = 'p', env = "REQPLAY_PROXY")]
    pub proxy: Option<String>,

    /// Log request/response headers and bodies
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Also append logs to this file
    #[arg(long = "out", short = 'o')]
    pub out: Option<PathBuf>,

    /// Header override file (flat JSON or TOML map of name to value)
    #[arg(long = "headers")]
    pub headers_file: Option<PathBuf>,

    /// Header override in 'Key: Value' format (repeatable, wins over --headers)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl ReplayArgs {
    /// CLI header overrides as a map; a later flag replaces an earlier one.
    #[must_use]
    pub fn header_overrides(&self) -> Headers {
        self.headers.iter().cloned().collect()
    }
}
