//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks so the endpoint methods stay focused on
//! request construction. The backend reports failures as
//! `{"error": "..."}`; that message is lifted into [`BackendError::Api`]
//! when present, otherwise the raw body is kept.

use crate::error::BackendError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success; every non-2xx status becomes
/// [`BackendError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(BackendError::Api {
            status,
            message: api_message(&body),
        });
    }
    Ok(resp)
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
