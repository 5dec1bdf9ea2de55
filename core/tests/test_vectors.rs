//! Verify backlog search against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the query, the expected outbound request, a
//! simulated server response and either the decoded orders or the error
//! text. Responses are replayed through a stub transport, so no network is
//! involved. Comparing parsed JSON (not raw strings) avoids false negatives
//! from field-ordering differences.

use std::sync::{Arc, Mutex};

use otpravka_core::{
    Client, ClientConfig, Context, HttpMethod, HttpRequest, HttpResponse, Order, Transport,
    TransportError,
};

const BASE_URL: &str = "https://otpravka-api.pochta.ru";

/// Replays one canned response and remembers the request it was given.
struct Replay {
    response: HttpResponse,
    seen: Mutex<Option<HttpRequest>>,
}

impl Transport for Replay {
    fn send(&self, _ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.seen.lock().unwrap() = Some(request.clone());
        Ok(self.response.clone())
    }
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

#[test]
fn search_test_vectors() {
    let raw = include_str!("../../test-vectors/search.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = case["query"].as_str().unwrap();
        let expected_req = &case["expected_request"];
        let sim = &case["simulated_response"];

        let replay = Arc::new(Replay {
            response: HttpResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                headers: vec![(
                    "Content-Type".to_string(),
                    sim["content_type"].as_str().unwrap().to_string(),
                )],
                body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
            },
            seen: Mutex::new(None),
        });
        let client = Client::with_transport(
            ClientConfig::new("test-key", "test-token").unwrap(),
            replay.clone(),
        );

        let result = client.orders().search(&Context::background(), query);

        // Verify the request that reached the transport
        let req = replay.seen.lock().unwrap().clone().unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(
            req.url.as_str(),
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: url"
        );
        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify the decoded outcome
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.to_string(), expected_error.as_str().unwrap(), "{name}: error");
            assert!(err.response().is_some(), "{name}: raw response kept");
        } else {
            let (search, response) = result.unwrap();
            assert_eq!(response.status as u64, sim["status"].as_u64().unwrap(), "{name}: status");
            let orders = search.orders;
            let expected: Vec<Order> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(orders, expected, "{name}: parsed result");
        }
    }
}
