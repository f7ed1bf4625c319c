use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, level_filters::LevelFilter, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::error::AppResult;
use crate::events::{EventReceiver, ReplayEvent};

/// Installs the global subscriber: stdout, plus an appending plain-text file
/// when `log_file` is set.
///
/// # Errors
///
/// Returns an error when `log_file` cannot be opened for appending.
pub fn init_logging(verbose: bool, no_color: bool, log_file: Option<&Path>) -> AppResult<()> {
    let filter = std::env::var("REQPLAY_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(!no_color).with_target(false))
        .with(file_layer);

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
    Ok(())
}

/// True when the installed subscriber lets debug records through, so request
/// and response payloads are worth carrying on events.
pub fn payloads_enabled() -> bool {
    LevelFilter::current() >= LevelFilter::DEBUG
}

/// Drains replay events into `tracing` until every sender is dropped.
pub fn spawn_event_logger(mut events: EventReceiver) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            log_event(&event);
        }
    })
}

fn log_event(event: &ReplayEvent) {
    match event {
        ReplayEvent::DefinitionParsed { key, kind } => {
            info!("Loaded {} definition '{}'", kind, key);
        }
        ReplayEvent::DefinitionFailed { key, path, error } => {
            error!(
                "Failed to load definition '{}' from {}: {}",
                key,
                path.display(),
                error
            );
        }
        ReplayEvent::MalformedHeader { tag, header } => {
            warn!("Skipping malformed header '{}' in '{}'", header, tag);
        }
        ReplayEvent::RequestSent {
            tag,
            method,
            url,
            payload,
        } => {
            info!("Sending {}, {} {}", tag, method, url);
            if let Some(payload) = payload {
                debug!("{} headers: {:?}", tag, payload.headers);
                if let Some(body) = payload.body.as_ref() {
                    debug!("{} body: {}", tag, body);
                }
            }
        }
        ReplayEvent::ResponseReceived {
            tag,
            status,
            body_len,
            body,
        } => {
            info!("{} responded {}, {} bytes", tag, status, body_len);
            if let Some(body) = body {
                debug!("{} response: {}", tag, body);
            }
        }
        ReplayEvent::RequestFailed { tag, error } => {
            error!("{} failed: {}", tag, error);
        }
        ReplayEvent::RunCompleted { definitions } => {
            info!("Completed {} request definitions", definitions);
        }
    }
}
