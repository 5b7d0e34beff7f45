use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::error::ClientError;

pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| value.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

/// Server-supplied `{"error": "..."}` message, if the body carries one
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("error")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::String(_) | Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Interpret a response body as JSON.
///
/// A non-JSON content type is a `Protocol` error whatever the status. A
/// non-success status is a `Transport` error carrying the server's message or
/// `fallback`. A success body that does not match `T` is a `Protocol` error.
pub fn interpret_json<T: DeserializeOwned>(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
    fallback: &str,
) -> Result<T, ClientError> {
    if !is_json_content_type(content_type) {
        return Err(ClientError::Protocol(format!(
            "expected application/json, got {} (status {})",
            content_type.unwrap_or("no content type"),
            status.as_u16()
        )));
    }

    if !status.is_success() {
        return Err(ClientError::Transport(
            error_message(body).unwrap_or_else(|| fallback.to_string()),
        ));
    }

    serde_json::from_slice(body).map_err(|e| ClientError::Protocol(e.to_string()))
}

pub async fn read_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ClientError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let body = response
        .bytes()
        .await
        .map_err(|e| ClientError::Transport(format!("failed to read response: {}", e)))?;

    interpret_json(status, content_type.as_deref(), &body, fallback)
}
