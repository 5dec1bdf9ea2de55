//! Content-type negotiation and body codecs.
//!
//! # Design
//! Supported body formats form a closed set, `ContentType`. Declared
//! content-type strings are parsed into it once, at the boundary, and
//! anything outside the set is rejected there.
//!
//! Decoding follows a two-stage policy. A body that fails to decode into the
//! caller's target is decoded again into the server's error shapes; a
//! populated error code from either shape replaces the original decode
//! error. `CodedError` is tried first, then `ErrorResponse`. An empty JSON or
//! XML body is a successful no-op decode.

use mime::Mime;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, CodedError, ErrorResponse, ResponseError};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_TEXT_HTML: &str = "text/html";

/// A body format the client knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    Xml,
    /// Plain text or HTML; only ever read as an error message.
    Text,
}

impl ContentType {
    /// Match a `Content-Type` header value against the supported formats.
    ///
    /// Each `;`-separated segment is tried in turn, so
    /// `application/json; charset=utf-8` resolves to `Json`. Parsing stops at
    /// the first segment that is not a media type.
    pub fn parse(value: &str) -> Option<Self> {
        for segment in value.split(';') {
            let Ok(mime) = segment.trim().parse::<Mime>() else {
                break;
            };
            let found = match mime.essence_str().to_ascii_lowercase().as_str() {
                CONTENT_TYPE_JSON => Some(ContentType::Json),
                CONTENT_TYPE_XML | "text/xml" => Some(ContentType::Xml),
                CONTENT_TYPE_TEXT_HTML | "text/plain" => Some(ContentType::Text),
                _ => None,
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => CONTENT_TYPE_JSON,
            ContentType::Xml => CONTENT_TYPE_XML,
            ContentType::Text => CONTENT_TYPE_TEXT_HTML,
        }
    }
}

/// Serialize a request body. Only JSON and XML are outbound formats.
pub fn encode_body<B: Serialize + ?Sized>(
    content_type: ContentType,
    body: &B,
) -> Result<Vec<u8>, ApiError> {
    match content_type {
        ContentType::Json => {
            serde_json::to_vec(body).map_err(|e| ApiError::Serialization(e.to_string()))
        }
        ContentType::Xml => quick_xml::se::to_string(body)
            .map(String::into_bytes)
            .map_err(|e| ApiError::Serialization(e.to_string())),
        ContentType::Text => Err(ApiError::UnsupportedContentType(
            content_type.as_str().to_string(),
        )),
    }
}

/// Decode `body` into `target` according to the declared `content_type`.
///
/// `target` is only written on a successful, non-empty decode.
pub fn decode_body<T: DeserializeOwned>(
    content_type: &str,
    body: &[u8],
    target: &mut T,
) -> Result<(), ResponseError> {
    let format = ContentType::parse(content_type)
        .ok_or_else(|| ResponseError::UnknownContentType(content_type.to_string()))?;

    if format == ContentType::Text {
        return Err(ResponseError::Message(
            String::from_utf8_lossy(body).into_owned(),
        ));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    match decode_structured::<T>(format, body) {
        Ok(value) => {
            *target = value;
            Ok(())
        }
        Err(err) => Err(structured_error(format, body).unwrap_or(err)),
    }
}

fn decode_structured<T: DeserializeOwned>(
    format: ContentType,
    body: &[u8],
) -> Result<T, ResponseError> {
    match format {
        ContentType::Json => Ok(serde_json::from_slice(body)?),
        _ => Ok(quick_xml::de::from_reader(body)?),
    }
}

/// Second pass over a body that failed to decode into the caller's type.
fn structured_error(format: ContentType, body: &[u8]) -> Option<ResponseError> {
    if let Ok(coded) = decode_structured::<CodedError>(format, body) {
        if coded.code != 0 {
            return Some(ResponseError::Coded(coded));
        }
    }
    match decode_structured::<ErrorResponse>(format, body) {
        Ok(api) if !api.code.is_empty() => Some(ResponseError::Api(api)),
        _ => None,
    }
}
