//! The network seam between `Client` and the outside world.
//!
//! # Design
//! `Client` never performs I/O itself; it hands an `HttpRequest` to a
//! `Transport` and gets a fully buffered `HttpResponse` back. Connection
//! handling, TLS and redirects belong to the transport. Tests substitute
//! stub transports to observe what the client sends.

use std::time::Duration;

use ureq::Agent;

use crate::context::Context;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns the raw response, whatever its status.
pub trait Transport: Send + Sync {
    fn send(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a shared `ureq` agent.
///
/// Non-2xx statuses are returned as responses rather than errors so the
/// client can decode server error bodies. When the context carries a
/// deadline, that one request gets a global timeout of the time left; the
/// agent itself (proxy, TLS, user agent, pool) is always the configured one.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self::from_agent(agent)
    }

    /// Use a caller-configured agent. It should have `http_status_as_error`
    /// disabled, otherwise error bodies never reach the decoder.
    pub fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = &self.agent;
        let timeout = ctx.remaining();
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => prepare(agent.get(url), request, timeout).call(),
            HttpMethod::Delete => prepare(agent.delete(url), request, timeout).call(),
            HttpMethod::Post => {
                let builder = prepare(agent.post(url), request, timeout);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = prepare(agent.put(url), request, timeout);
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(TransportError::new)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(TransportError::new)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Copy the request headers and, when the context has a deadline, bound this
/// request alone by the time left.
fn prepare<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
    timeout: Option<Duration>,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    match timeout {
        Some(timeout) => builder.config().timeout_global(Some(timeout)).build(),
        None => builder,
    }
}
