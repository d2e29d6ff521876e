use serde_json::Value;
use thiserror::Error;

pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session store error: {0}")]
    Session(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    RequestFailed,
    Transport,
    Decode,
    Session,
    Config,
}

/// Best-effort message extraction from an error body: the first of
/// `error`, `message` that is a non-empty string. `None` when the body is
/// empty, not JSON, or carries neither.
pub fn error_message(body: &[u8]) -> Option<String> {
    let parsed: Value = serde_json::from_slice(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        parsed
            .get(*key)
            .and_then(Value::as_str)
            .filter(|msg| !msg.trim().is_empty())
            .map(str::to_string)
    })
}

impl ApiError {
    pub fn unauthorized(body: &[u8]) -> Self {
        ApiError::Unauthorized {
            message: error_message(body)
                .unwrap_or_else(|| AUTH_REQUIRED_MESSAGE.to_string()),
        }
    }

    pub fn request_failed(status: u16, body: &[u8]) -> Self {
        ApiError::RequestFailed {
            status,
            message: error_message(body)
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ApiError::RequestFailed { .. } => ErrorKind::RequestFailed,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Session(_) => ErrorKind::Session,
            ApiError::Config(_) => ErrorKind::Config,
        }
    }

    /// HTTP status carried by the failure, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthorized { message } => message.clone(),
            ApiError::RequestFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
