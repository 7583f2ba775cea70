//! UI extension error log endpoint.
//!
//! The block UI posts its client-side errors here so they land in the
//! server log (and Sentry) instead of the merchant's browser console.

use axum::{
    Router,
    body::Bytes,
    extract::rejection::BytesRejection,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::post,
};
use serde_json::Value;

use crate::state::AppState;

/// Build the log router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/log", post(log_ui_error))
}

/// Log a client-side error report.
///
/// - 415 if the content type is not JSON, whatever the body
/// - 400 if the body cannot be read, is not JSON, or is empty or falsy
/// - 204 once the body has been logged
pub async fn log_ui_error(
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> StatusCode {
    if !is_json(&headers) {
        return StatusCode::UNSUPPORTED_MEDIA_TYPE;
    }

    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(error = %e.body_text(), "Unreadable UI error report");
            return StatusCode::BAD_REQUEST;
        }
    };

    match serde_json::from_slice::<Value>(&body) {
        Ok(value) if !is_falsy(&value) => {
            tracing::error!(body = %String::from_utf8_lossy(&body), "[UI EXT ERROR]");
            StatusCode::NO_CONTENT
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// `null`, `false`, `0` and `""` carry no report.
#[allow(clippy::float_cmp)]
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
