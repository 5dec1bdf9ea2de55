//! Authenticated request/response client for the postal shipping API.
//!
//! # Design
//! `Client` holds an immutable `ClientConfig` and a shared `Transport`; no
//! call mutates either, so one client can serve many threads at once. A call
//! is three linear steps:
//!
//! 1. `new_request` resolves the path, encodes the body and attaches the
//!    authentication headers. No I/O happens here.
//! 2. `execute` hands the request to the transport and waits for it or for
//!    the caller's context to end, whichever comes first. A context that
//!    ended wins over whatever the transport produced.
//! 3. `execute_into` additionally decodes the body into a caller-supplied
//!    target via `codec::decode_body`. Decode failures keep the raw response.

use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::codec::{self, ContentType, CONTENT_TYPE_JSON};
use crate::config::ClientConfig;
use crate::context::Context;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Order, OrderSearchResponse};

pub const HEADER_API_KEY: &str = "X-User-Authorization";
pub const HEADER_ACCESS_TOKEN: &str = "Authorization";

pub const BACKLOG_SEARCH_PATH: &str = "1.0/backlog/search";

/// How often a blocked call re-checks its context.
const CONTEXT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Client for the postal shipping API.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Client over the default blocking `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn orders(&self) -> OrderService<'_> {
        OrderService { client: self }
    }

    /// Build an authenticated request for `path`, relative to the base URL.
    ///
    /// A leading `/` on `path` is ignored, so paths always nest under the
    /// base URL's own path. When `body` is present it is encoded with the
    /// codec named by `content_type`, which must be JSON or XML.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        content_type: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.config.base_url().join(path.trim_start_matches('/'))?;

        let mut headers = Vec::with_capacity(3);
        let body = match body {
            Some(body) => {
                let format = ContentType::parse(content_type)
                    .ok_or_else(|| ApiError::UnsupportedContentType(content_type.to_string()))?;
                let encoded = codec::encode_body(format, body)?;
                headers.push(("Content-Type".to_string(), content_type.to_string()));
                Some(encoded)
            }
            None => None,
        };
        headers.push((
            HEADER_API_KEY.to_string(),
            format!("Basic {}", self.config.api_key()),
        ));
        headers.push((
            HEADER_ACCESS_TOKEN.to_string(),
            format!("AccessToken {}", self.config.access_token()),
        ));

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send `request` and return the raw response without decoding it.
    ///
    /// The transport runs on a worker thread while this thread watches `ctx`.
    /// Once the context is cancelled or past its deadline the call returns the
    /// context error straight away; the worker's late result is discarded.
    pub fn execute(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(err) = ctx.err() {
            return Err(err.into());
        }

        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let (tx, rx) = mpsc::channel();
        let transport = Arc::clone(&self.transport);
        let worker_ctx = ctx.clone();
        let worker_request = request.clone();
        thread::Builder::new()
            .name("otpravka-transport".to_string())
            .spawn(move || {
                // The receiver is gone if the caller already gave up.
                let _ = tx.send(transport.send(&worker_ctx, &worker_request));
            })
            .map_err(TransportError::new)?;

        let outcome = loop {
            match rx.recv_timeout(CONTEXT_POLL_INTERVAL) {
                Ok(outcome) => break outcome,
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(ctx_err) = ctx.err() {
                        warn!(error = %ctx_err, "context ended while request in flight");
                        return Err(ctx_err.into());
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    break Err(TransportError::new("transport worker exited without a result"))
                }
            }
        };

        if let Some(ctx_err) = ctx.err() {
            if let Err(err) = &outcome {
                warn!(error = %err, "transport failed after context ended");
            }
            return Err(ctx_err.into());
        }
        let response = outcome?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );
        Ok(response)
    }

    /// Send `request` and decode the response body into `target`.
    ///
    /// An empty JSON or XML body succeeds and leaves `target` unchanged.
    /// Structured server errors are preferred over generic decode failures;
    /// either way the error carries the raw response.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: &HttpRequest,
        target: &mut T,
    ) -> Result<HttpResponse, ApiError> {
        let response = self.execute(ctx, request)?;
        match codec::decode_body(response.content_type(), &response.body, target) {
            Ok(()) => Ok(response),
            Err(source) => {
                debug!(status = response.status, error = %source, "response decode failed");
                Err(ApiError::Response {
                    response: Box::new(response),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Operations on the sender's order backlog.
#[derive(Debug, Clone, Copy)]
pub struct OrderService<'a> {
    client: &'a Client,
}

impl OrderService<'_> {
    pub fn build_search(&self, query: &str) -> Result<HttpRequest, ApiError> {
        let mut request = self.client.new_request::<()>(
            HttpMethod::Get,
            BACKLOG_SEARCH_PATH,
            CONTENT_TYPE_JSON,
            None,
        )?;
        request.append_query("query", query);
        Ok(request)
    }

    /// Look up backlog orders by free-text query (order number, barcode,
    /// recipient and so on). The raw response comes back alongside the
    /// orders for status and header inspection.
    #[instrument(skip(self, ctx))]
    pub fn search(
        &self,
        ctx: &Context,
        query: &str,
    ) -> Result<(OrderSearchResponse, HttpResponse), ApiError> {
        let request = self.build_search(query)?;
        let mut orders: Vec<Order> = Vec::new();
        let response = self.client.execute_into(ctx, &request, &mut orders)?;
        Ok((OrderSearchResponse { orders }, response))
    }
}
