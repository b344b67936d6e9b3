//! Shared response handling.
//!
//! Every endpoint maps status codes the same way: 2xx parses the body, 401
//! means the credential is missing or expired, anything else becomes a
//! `ServerError` carrying the backend's `detail` message when it sent one.

use crate::error::{ClientError, Result};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// Error body produced by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Send a request, separating unreachable backends from other failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    request.send().await.map_err(ClientError::from_send)
}

/// Parse a successful response body, or map the failure.
pub(crate) async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_for(status, response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// Parse a body that may legitimately be empty or `null`.
pub(crate) async fn parse_optional<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> Result<Option<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(error_for(status, response).await);
    }

    let body = response.text().await?;
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }

    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// Build the error for a non-2xx response.
pub(crate) async fn error_for(status: StatusCode, response: Response) -> ClientError {
    let body = response.text().await.unwrap_or_default();

    if status == StatusCode::UNAUTHORIZED {
        warn!(status = %status, error = %body, "Request rejected: credential missing or expired");
        return ClientError::AuthRequired;
    }

    ClientError::ServerError {
        status: status.as_u16(),
        message: detail_message(&body),
    }
}

/// Pull `detail` out of an error body, falling back to the raw text.
pub(crate) fn detail_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}
