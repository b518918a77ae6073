/// Flat error type shared by every layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Transport failure before a response arrived
    NetworkError(String),
    /// Non-2xx response; `detail` is the backend's message when it sent one
    HttpStatus { status: u16, detail: String },
    Timeout(u32),
    DecodeError(String),
}

impl AppError {
    /// Message suitable for showing next to the search bar.
    pub fn user_message(&self) -> String {
        match self {
            AppError::HttpStatus { detail, .. } => detail.clone(),
            AppError::Timeout(_) => "Request timed out".to_string(),
            AppError::NetworkError(msg) | AppError::DecodeError(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AppError::HttpStatus { status, detail } => write!(f, "HTTP {}: {}", status, detail),
            AppError::Timeout(ms) => write!(f, "Timeout after {} ms", ms),
            AppError::DecodeError(msg) => write!(f, "Decode Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::DecodeError(error.to_string())
    }
}

pub type NetworkResult<T> = Result<T, AppError>;
