use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const API_KEY_HEADER: &str = "x-user-authorization";
pub const ACCESS_TOKEN_HEADER: &str = "authorization";

/// The subset of a backlog order the mock server stores and searches.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Order {
    pub id: i64,
    pub order_num: String,
    pub barcode: String,
    pub recipient_name: String,
    pub index_to: i64,
    pub mass: i64,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Error body with a numeric code.
#[derive(Debug, Serialize, Deserialize)]
pub struct CodedError {
    pub code: i64,
    pub text: String,
}

/// Error body with a symbolic code and sub-code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    #[serde(rename = "sub-code")]
    pub sub_code: String,
    pub desc: String,
}

pub type Db = Arc<RwLock<Vec<Order>>>;

pub fn seed() -> Vec<Order> {
    vec![
        Order {
            id: 1001,
            order_num: "A-1234".to_string(),
            barcode: "80080012345678".to_string(),
            recipient_name: "Petrov P.P.".to_string(),
            index_to: 101000,
            mass: 250,
        },
        Order {
            id: 1002,
            order_num: "B-5678".to_string(),
            barcode: "80080087654321".to_string(),
            recipient_name: "Sidorova A.V.".to_string(),
            index_to: 190000,
            mass: 1200,
        },
    ]
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(orders: Vec<Order>) -> Router {
    let db: Db = Arc::new(RwLock::new(orders));
    Router::new()
        .route("/1.0/backlog/search", get(search_backlog))
        .fallback(not_found)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn search_backlog(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    if let Err(rejection) = authorize(&headers) {
        return rejection;
    }

    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        let body = CodedError {
            code: 1001,
            text: "query is required".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let orders = db.read().await;
    let found: Vec<Order> = orders
        .iter()
        .filter(|order| matches(order, &query))
        .cloned()
        .collect();
    tracing::debug!(query = %query, found = found.len(), "backlog search");
    Json(found).into_response()
}

fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let scheme_value = |name: &str, scheme: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix(scheme))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .is_some()
    };

    if !scheme_value(API_KEY_HEADER, "Basic ") {
        return Err(unauthorized("NO_API_KEY", "X-User-Authorization header is missing"));
    }
    if !scheme_value(ACCESS_TOKEN_HEADER, "AccessToken ") {
        return Err(unauthorized("NO_TOKEN", "Authorization header is missing"));
    }
    Ok(())
}

fn unauthorized(sub_code: &str, desc: &str) -> Response {
    let body = ErrorResponse {
        code: "UNAUTHORIZED".to_string(),
        sub_code: sub_code.to_string(),
        desc: desc.to_string(),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

fn matches(order: &Order, query: &str) -> bool {
    order.order_num.contains(query)
        || order.barcode.contains(query)
        || order.recipient_name.contains(query)
        || order.id.to_string().contains(query)
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (
        StatusCode::NOT_FOUND,
        Html("<html><body><h1>404 Not Found</h1></body></html>"),
    )
}
