//! API-key gate for the `/api` routes.
//!
//! Requests must carry `X-API-User-Name: <key>`; anything else gets a 403.
//! The admin pages are deliberately outside this gate.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const API_KEY_HEADER: &str = "X-API-User-Name";

/// The configured API key value.
#[derive(Clone, Debug)]
pub struct ApiKey(pub String);

pub async fn require_api_key(
    State(key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented != Some(key.0.as_str()) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "Access Denied",
                "message": format!("Invalid or missing {API_KEY_HEADER} header"),
            })),
        )
            .into_response();
    }

    next.run(request).await
}
