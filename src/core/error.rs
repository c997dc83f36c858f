use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Error taxonomy for gateway operations
///
/// `Token` and `Charge` carry provider-side rejections whose message has
/// already been passed through the translation table. `Precondition` marks
/// caller/integration bugs detected before any remote call. `Inconsistency`
/// marks a remote charge that exists without a matching local commit and
/// always requires manual reconciliation.
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    /// Card tokenization rejected by the provider
    #[error("tokenization rejected: {0}")]
    Token(String),

    /// Charge, capture, refund or cancel rejected by the provider
    #[error("charge rejected: {0}")]
    Charge(String),

    /// Required local state missing or invalid
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Merchant configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Remote charge committed without a matching local record
    #[error("reconciliation gap: {0}")]
    Inconsistency(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Token(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Charge(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Precondition(_) => StatusCode::FORBIDDEN,
            GatewayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Inconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Json(_) => StatusCode::BAD_REQUEST,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl GatewayError {
    pub fn token(msg: impl Into<String>) -> Self {
        GatewayError::Token(msg.into())
    }

    pub fn charge(msg: impl Into<String>) -> Self {
        GatewayError::Charge(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        GatewayError::Precondition(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        GatewayError::Configuration(msg.into())
    }

    pub fn inconsistency(msg: impl Into<String>) -> Self {
        GatewayError::Inconsistency(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        GatewayError::Internal(msg.into())
    }
}
