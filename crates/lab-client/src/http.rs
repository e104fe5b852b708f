//! Shared HTTP response helpers.
//!
//! Centralizes status-code classification (4xx → [`ApiError::Rejected`]
//! carrying the server's message, anything else non-success →
//! [`ApiError::Server`]) and created-id extraction so resource modules stay
//! focused on paths and payloads.

use serde_json::Value;

use crate::error::ApiError;

/// Check an HTTP response for error statuses.
///
/// Returns the response unchanged on success.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    if status.is_client_error() {
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a user-facing message out of an error body.
///
/// Accepts `{ "message": .. }`, problem-details `{ "title": .. }`, a bare JSON
/// string, or plain text.
pub fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "Message", "title"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        Ok(Value::String(text)) => Some(text),
        _ => Some(body.to_string()),
    }
}

/// Extract the id of a created entity from a create response body.
///
/// The backend answers with `{ "value": id }`, `{ "value": { "id": .. } }`,
/// `{ "id": .. }`, or the bare id. Anything else yields `None`.
pub fn extract_created_id(body: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(body.trim()) {
        Ok(value) => value,
        Err(_) => {
            let text = body.trim();
            return (!text.is_empty() && !text.contains(char::is_whitespace))
                .then(|| text.to_string());
        }
    };
    id_of(&value)
}

fn id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        Value::Object(map) => map
            .get("id")
            .and_then(id_of)
            .or_else(|| map.get("value").and_then(id_of)),
        _ => None,
    }
}
