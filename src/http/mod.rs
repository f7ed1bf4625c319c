//! Sending parsed requests over per-unit transport sessions.
mod requester;
mod session;


pub use requester::{Requester, SendOutcome, correlation_tag, merge_headers, resolve_url};
pub use session::TransportSession;
