//! Blocking client core for the Russian Post shipping ("otpravka") API.
//!
//! # Overview
//! Every call is a single linear round trip: build an authenticated
//! `HttpRequest`, hand it to a `Transport`, decode the `HttpResponse` into
//! a typed value or a typed error.
//!
//! # Design
//! - `ClientConfig` is an explicit value; the production base URL is only a
//!   default.
//! - `Client` is stateless beyond its config and transport and is safe to
//!   share between threads.
//! - Body formats are the closed set `ContentType` (JSON, XML, text/HTML).
//! - Server error bodies (`CodedError`, `ErrorResponse`) win over generic
//!   decode failures when they carry a code.
//! - The library emits `tracing` events but never installs a subscriber.

pub mod client;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{Client, OrderService};
pub use codec::{ContentType, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT_HTML, CONTENT_TYPE_XML};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use context::{Context, ContextError};
pub use error::{ApiError, CodedError, ErrorResponse, ResponseError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    CustomsDeclaration, CustomsEntry, DeliveryTime, Dimension, Goods, GoodsItem, Order,
    OrderSearchResponse,
};
