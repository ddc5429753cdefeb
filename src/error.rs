use std::fmt;

#[derive(Debug)]
pub enum StudioError {
    ConfigError(String),
    RequestError(String),
    ResponseError(String),
    RateLimited(String),
    RemoteError(String),
    NoImageReturned,
    RetriesExhausted,
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            StudioError::RequestError(msg) => write!(f, "Request error: {}", msg),
            StudioError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            StudioError::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            StudioError::RemoteError(msg) => write!(f, "Remote service error: {}", msg),
            StudioError::NoImageReturned => write!(f, "No image returned"),
            StudioError::RetriesExhausted => write!(f, "Exhausted retries"),
        }
    }
}

impl std::error::Error for StudioError {}

impl StudioError {
    /// Reason string surfaced to API callers. Remote bodies pass through
    /// unmodified; the remaining variants map to fixed reasons.
    pub fn reason(&self) -> String {
        match self {
            StudioError::RateLimited(body) | StudioError::RemoteError(body) => body.clone(),
            StudioError::NoImageReturned => "No image returned".to_string(),
            StudioError::RetriesExhausted => "Exhausted retries".to_string(),
            StudioError::ConfigError(msg)
            | StudioError::RequestError(msg)
            | StudioError::ResponseError(msg) => msg.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
