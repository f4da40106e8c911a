/// Errors from the orchestration API.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API key authentication is required")]
    MissingApiKey,
    #[error("HTTP {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("invalid response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// Short classification string for logging.
    pub fn error_kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "auth",
            Self::Status { .. } => "http_status",
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
            Self::Client(_) => "client",
        }
    }
}

/// Errors from webhook delivery. Callers log these and move on.
#[derive(Clone, Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("webhook request failed: {0}")]
    Transport(String),
    #[error("failed to build webhook client: {0}")]
    Client(String),
}
