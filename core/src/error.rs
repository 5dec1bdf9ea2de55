//! Error types for the postal API client.
//!
//! # Design
//! Failures before the network (unsupported body type, bad URL) and transport
//! failures are plain `ApiError` variants. Anything that goes wrong once a
//! response exists is wrapped in `ApiError::Response`, which keeps the raw
//! `HttpResponse` next to the `ResponseError` so callers can still inspect
//! status and headers.
//!
//! The server reports failures in two body shapes: `CodedError`
//! (numeric code + text) and `ErrorResponse` (code, sub-code, description).
//! Both double as serde targets for the decoder's fallback pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ContextError;
use crate::http::HttpResponse;

/// Server error body with a numeric code and a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{code}] {text}")]
#[serde(default)]
pub struct CodedError {
    pub code: i64,
    pub text: String,
}

/// Server error body with a symbolic code, sub-code and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{code}]({sub_code}) \"{desc}\"")]
#[serde(default)]
pub struct ErrorResponse {
    pub code: String,
    #[serde(rename = "sub-code")]
    pub sub_code: String,
    pub desc: String,
}

/// Failure raised by an injected transport.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// Errors produced while turning a response body into a value.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response Content-Type {0:?} is unknown")]
    UnknownContentType(String),

    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML decode failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Text or HTML body, surfaced verbatim.
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Coded(CodedError),

    #[error(transparent)]
    Api(ErrorResponse),
}

/// Errors returned by `Client` and the services built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The declared request content type has no outbound codec.
    #[error("request Content-Type {0:?} is unknown")]
    UnsupportedContentType(String),

    /// The request body could not be encoded.
    #[error("request serialization failed: {0}")]
    Serialization(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The caller's context was cancelled or ran past its deadline.
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The server answered but the body could not be turned into the
    /// requested value, or it carried a structured error.
    #[error("{source}")]
    Response {
        response: Box<HttpResponse>,
        source: ResponseError,
    },
}

impl ApiError {
    /// The raw response, when the failure happened after one arrived.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            ApiError::Response { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            ApiError::Response {
                source: ResponseError::Api(e),
                ..
            } => Some(e),
            _ => None,
        }
    }

    pub fn coded_error(&self) -> Option<&CodedError> {
        match self {
            ApiError::Response {
                source: ResponseError::Coded(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coded_error_display() {
        let err = CodedError {
            code: 1001,
            text: "query is required".to_string(),
        };
        assert_eq!(err.to_string(), "[1001] query is required");
    }

    #[test]
    fn error_response_display() {
        let err = ErrorResponse {
            code: "UNAUTHORIZED".to_string(),
            sub_code: "BAD_TOKEN".to_string(),
            desc: "token expired".to_string(),
        };
        assert_eq!(err.to_string(), r#"[UNAUTHORIZED](BAD_TOKEN) "token expired""#);
    }

    #[test]
    fn error_response_reads_kebab_sub_code() {
        let err: ErrorResponse =
            serde_json::from_str(r#"{"code":"X","sub-code":"Y","desc":"Z"}"#).unwrap();
        assert_eq!(err.sub_code, "Y");
    }

    #[test]
    fn accessors_reach_structured_errors() {
        let response = HttpResponse {
            status: 400,
            headers: Vec::new(),
            body: Vec::new(),
        };
        let err = ApiError::Response {
            response: Box::new(response),
            source: ResponseError::Coded(CodedError {
                code: 7,
                text: "bad".to_string(),
            }),
        };
        assert_eq!(err.response().map(|r| r.status), Some(400));
        assert_eq!(err.coded_error().map(|e| e.code), Some(7));
        assert!(err.error_response().is_none());
        assert_eq!(err.to_string(), "[7] bad");
    }

    #[test]
    fn transport_error_wraps_message() {
        let err = ApiError::from(TransportError::new("connection reset"));
        assert_eq!(err.to_string(), "transport failed: connection reset");
        assert!(err.response().is_none());
    }
}
