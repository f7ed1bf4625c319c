use reqwest::{Client, Proxy};

use crate::error::DispatchError;

/// One HTTP client with its own connection pool.
///
/// Every concurrent unit opens its own session and drops it when its replay
/// finishes, so pools are never shared between units.
#[derive(Debug)]
pub struct TransportSession {
    client: Client,
}

impl TransportSession {
    /// Builds a client, routing every request through `proxy` when set.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::BuildSession`] when the client cannot be built.
    pub fn open(proxy: Option<&Proxy>) -> Result<Self, DispatchError> {
        let mut builder = Client::builder();
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy.clone());
        }
        let client = builder
            .build()
            .map_err(|err| DispatchError::BuildSession { source: err })?;
        Ok(Self { client })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }
}
