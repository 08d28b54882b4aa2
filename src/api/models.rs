use serde::{Deserialize, Serialize};

/// Request body / query parameters for the check-url endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct CheckUrlRequest {
    /// URL to classify; optional so a missing field becomes a 400 with a
    /// message instead of a bare deserialization error
    pub url: Option<String>,
}

/// Standard error response format for the API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Status indicator: error
    pub status: String,

    /// Error message details
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Response for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Status indicator: ok
    pub status: String,

    /// Human-readable status line
    pub message: String,

    /// Whether the trained classifier and scaler are loaded
    pub model_loaded: bool,

    /// Seconds since the server started
    pub uptime_secs: u64,
}

/// Response for the connectivity probe endpoint
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}
