//! Structured facts emitted by the parsers, catalog, and dispatch engine.
//!
//! Components receive an [`EventSink`] when they are constructed and push
//! [`ReplayEvent`] values into it. Rendering the events (to a terminal, a log
//! file, or nowhere) is the receiver's business.
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::parser::DefinitionKind;
use crate::request::{Headers, HttpMethod};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEvent {
    DefinitionParsed {
        key: String,
        kind: DefinitionKind,
    },
    DefinitionFailed {
        key: String,
        path: PathBuf,
        error: String,
    },
    MalformedHeader {
        tag: String,
        header: String,
    },
    RequestSent {
        tag: String,
        method: HttpMethod,
        url: String,
        payload: Option<RequestPayload>,
    },
    ResponseReceived {
        tag: String,
        status: u16,
        body_len: usize,
        body: Option<String>,
    },
    RequestFailed {
        tag: String,
        error: String,
    },
    RunCompleted {
        definitions: usize,
    },
}

/// Headers and body actually put on the wire for one send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    pub headers: Headers,
    pub body: Option<String>,
}

pub type EventReceiver = mpsc::UnboundedReceiver<ReplayEvent>;

/// Cloneable producer side of the event channel.
///
/// Request and response payloads are only attached to events when the sink
/// was built [`with_payloads`](EventSink::with_payloads).
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<ReplayEvent>>,
    payloads: bool,
}

impl EventSink {
    #[must_use]
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: Some(tx),
                payloads: false,
            },
            rx,
        )
    }

    /// A sink that discards every event.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            tx: None,
            payloads: false,
        }
    }

    #[must_use]
    pub fn with_payloads(mut self, payloads: bool) -> Self {
        self.payloads = payloads;
        self
    }

    /// Whether emitters should copy headers and bodies into their events.
    #[must_use]
    pub const fn payloads(&self) -> bool {
        self.payloads && self.tx.is_some()
    }

    pub fn emit(&self, event: ReplayEvent) {
        if let Some(tx) = self.tx.as_ref() {
            // A closed receiver only means nobody is listening anymore.
            drop(tx.send(event));
        }
    }
}
