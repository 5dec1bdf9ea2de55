//! HTTP exchange types passed between the client and its transport.
//!
//! # Design
//! Requests and responses are plain data. The client builds `HttpRequest`
//! values and decodes `HttpResponse` values; the injected [`Transport`]
//! is the only thing that touches the network. Response bodies are fully
//! buffered, so dropping an `HttpResponse` is all the cleanup a call needs.
//!
//! [`Transport`]: crate::transport::Transport

use url::Url;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An outbound request, fully resolved against the client's base URL.
///
/// Built by `Client::new_request`. Header names keep the casing they were
/// set with; lookups through [`HttpRequest::header`] ignore case.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Append a single query-string pair, percent-encoding both parts.
    pub fn append_query(&mut self, key: &str, value: &str) {
        self.url.query_pairs_mut().append_pair(key, value);
    }
}

/// A raw inbound response as returned by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The `Content-Type` header, or an empty string when the server sent none.
    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("")
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(headers: Vec<(&str, &str)>) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Vec::new(),
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(vec![("Content-Type", "application/json")]);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.content_type(), "application/json");
    }

    #[test]
    fn missing_content_type_is_empty() {
        let resp = response(vec![]);
        assert_eq!(resp.content_type(), "");
    }

    #[test]
    fn append_query_encodes_value() {
        let mut req = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("https://example.test/1.0/backlog/search").unwrap(),
            headers: Vec::new(),
            body: None,
        };
        req.append_query("query", "RA 644 & co");
        assert_eq!(
            req.url.as_str(),
            "https://example.test/1.0/backlog/search?query=RA+644+%26+co"
        );
    }
}
