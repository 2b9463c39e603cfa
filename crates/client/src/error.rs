use serde::Deserialize;
use thiserror::Error;

use orderlink_auth::ProfileFetchError;

/// Failure of a single API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("login response did not include a token")]
    MissingToken,

    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// Build a `Status` error, preferring the backend's `message` field.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| body.trim().to_string());
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The request never got an HTTP answer.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Timeout | ApiError::Network(_))
    }
}

impl From<ApiError> for ProfileFetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 401, .. } => ProfileFetchError::Unauthorized,
            ApiError::Status { status, message } => ProfileFetchError::Status { status, message },
            ApiError::Timeout => ProfileFetchError::Network("request timed out".to_string()),
            ApiError::Network(msg) | ApiError::Config(msg) => ProfileFetchError::Network(msg),
            ApiError::Parse(msg) => ProfileFetchError::Decode(msg),
            ApiError::MissingToken => ProfileFetchError::Decode(ApiError::MissingToken.to_string()),
        }
    }
}
