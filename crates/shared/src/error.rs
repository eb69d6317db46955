use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the catalog API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{status_code}: {message}")]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub status_code: u16,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
            status_code,
        }
    }

    /// Decodes an error body, falling back to the raw text when it is not the API's JSON shape.
    pub fn from_body(status_code: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiError>(body) {
            Ok(mut parsed) => {
                if parsed.status_code == 0 {
                    parsed.status_code = status_code;
                }
                if parsed.message.is_empty() {
                    parsed.message = parsed.error.clone().unwrap_or_default();
                }
                parsed
            }
            Err(_) => {
                let trimmed = body.trim();
                let message = if trimmed.is_empty() {
                    "empty response body".to_string()
                } else {
                    trimmed.to_string()
                };
                Self::new(status_code, message)
            }
        }
    }
}
