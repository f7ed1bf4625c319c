use std::time::Duration;

use reqwest::{
    Proxy, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tokio::time::sleep;
use uuid::Uuid;

use crate::error::{DispatchError, ValidationError};
use crate::events::{EventSink, ReplayEvent, RequestPayload};
use crate::request::{Headers, HttpMethod, RequestModel, find_header};

use super::session::TransportSession;

/// Result of one physical send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub tag: String,
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl SendOutcome {
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Sends [`RequestModel`]s with run-wide header overrides and proxy settings.
#[derive(Debug)]
pub struct Requester {
    overrides: Headers,
    proxy: Option<Proxy>,
    events: EventSink,
}

impl Requester {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProxyUrl`] when `proxy` is not a
    /// usable proxy URL.
    pub fn new(
        overrides: Headers,
        proxy: Option<&str>,
        events: EventSink,
    ) -> Result<Self, ValidationError> {
        let proxy = proxy
            .map(|url| {
                Proxy::all(url).map_err(|err| ValidationError::InvalidProxyUrl {
                    url: url.to_owned(),
                    source: err,
                })
            })
            .transpose()?;
        Ok(Self {
            overrides,
            proxy,
            events,
        })
    }

    /// Opens a fresh transport session for one concurrent unit.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::BuildSession`] when the client cannot be built.
    pub fn open_session(&self) -> Result<TransportSession, DispatchError> {
        TransportSession::open(self.proxy.as_ref())
    }

    /// Waits `delay`, then sends one copy of `model` over `session`.
    ///
    /// Overrides replace parsed headers of the same name, relative URLs are
    /// resolved against the `Host` header, and the send is tagged with a
    /// fresh correlation tag. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnsupportedMethod`] for verbs without a
    /// transport mapping, [`DispatchError::Transport`] for network failures,
    /// and a request-building error for bad URLs or headers.
    pub async fn send(
        &self,
        session: &TransportSession,
        model: &RequestModel,
        delay: Duration,
    ) -> Result<SendOutcome, DispatchError> {
        if !delay.is_zero() {
            sleep(delay).await;
        }

        let headers = merge_headers(&model.headers, &self.overrides);
        let url = resolve_url(&model.url, &headers);
        let tag = correlation_tag(&model.tag);

        let payload = self.events.payloads().then(|| RequestPayload {
            headers: headers.clone(),
            body: model.body.clone(),
        });
        self.events.emit(ReplayEvent::RequestSent {
            tag: tag.clone(),
            method: model.method,
            url: url.clone(),
            payload,
        });

        let response = execute(
            session,
            model.method,
            &url,
            &headers,
            model.body.as_deref(),
            &tag,
        )
        .await;
        let result = response.map(|(status, body)| SendOutcome {
            tag: tag.clone(),
            method: model.method,
            url,
            status,
            body,
        });

        match result.as_ref() {
            Ok(outcome) => self.events.emit(ReplayEvent::ResponseReceived {
                tag,
                status: outcome.status,
                body_len: outcome.body_len(),
                body: self.events.payloads().then(|| outcome.body.clone()),
            }),
            Err(err) => self.events.emit(ReplayEvent::RequestFailed {
                tag,
                error: err.to_string(),
            }),
        }
        result
    }
}

async fn execute(
    session: &TransportSession,
    method: HttpMethod,
    url: &str,
    headers: &Headers,
    body: Option<&str>,
    tag: &str,
) -> Result<(u16, String), DispatchError> {
    let client = session.client();
    let target = || {
        Url::parse(url).map_err(|err| DispatchError::InvalidUrl {
            tag: tag.to_owned(),
            url: url.to_owned(),
            source: err,
        })
    };
    let mut request = match method {
        HttpMethod::Get => client.get(target()?),
        HttpMethod::Post => client.post(target()?),
        HttpMethod::Put => client.put(target()?),
        HttpMethod::Delete => client.delete(target()?),
        HttpMethod::Patch | HttpMethod::Head | HttpMethod::Options => {
            return Err(DispatchError::UnsupportedMethod {
                tag: tag.to_owned(),
                method,
            });
        }
    };

    request = request.headers(build_header_map(headers, tag)?);
    if let Some(body) = body {
        request = request.body(body.to_owned());
    }

    let response = request.send().await.map_err(|err| classify(err, tag))?;
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|err| DispatchError::Transport {
            tag: tag.to_owned(),
            source: err,
        })?;
    Ok((status, text))
}

fn classify(err: reqwest::Error, tag: &str) -> DispatchError {
    if err.is_builder() {
        DispatchError::Request {
            tag: tag.to_owned(),
            source: err,
        }
    } else {
        DispatchError::Transport {
            tag: tag.to_owned(),
            source: err,
        }
    }
}

fn build_header_map(headers: &Headers, tag: &str) -> Result<HeaderMap, DispatchError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            DispatchError::InvalidHeaderName {
                tag: tag.to_owned(),
                header: key.clone(),
                source: err,
            }
        })?;
        let val = HeaderValue::from_str(value).map_err(|err| DispatchError::InvalidHeaderValue {
            tag: tag.to_owned(),
            header: key.clone(),
            source: err,
        })?;
        map.insert(name, val);
    }
    Ok(map)
}

/// Copies `headers` and applies `overrides` on top.
///
/// An override replaces every parsed header with the same name, compared
/// case-insensitively.
#[must_use]
pub fn merge_headers(headers: &Headers, overrides: &Headers) -> Headers {
    let mut merged = headers.clone();
    for (key, value) in overrides {
        merged.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Makes `url` absolute as `https://` + `Host` header + `url` unless it
/// already starts with `http://` or `https://`.
///
/// Without a `Host` header the result is `https://` + `url`.
#[must_use]
pub fn resolve_url(url: &str, headers: &Headers) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_owned();
    }
    let host = find_header(headers, "Host").unwrap_or_default();
    format!("https://{}{}", host, url)
}

/// `<tag>_<fresh uuid>`, unique for every send.
#[must_use]
pub fn correlation_tag(tag: &str) -> String {
    format!("{}_{}", tag, Uuid::new_v4().simple())
}
