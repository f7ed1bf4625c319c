mod args;
mod catalog;
mod config;
mod dispatch;
mod entry;
mod error;
mod events;
mod http;
mod logger;
mod parser;
mod request;
#[cfg(test)]
mod test_support;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
