// UI-facing error taxonomy.
//
// Every failure a controller can surface maps onto one of these variants so
// the renderer has a single shape to work with. Classification of backend
// messages is content-based, mirroring what the server actually sends.

use std::fmt;

use crate::api::client::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Empty or whitespace-only input; no request was sent.
    EmptyInput,

    /// The input cannot be a YouTube video URL.
    InvalidUrl(String),

    /// Generic backend extraction failure.
    Extraction(String),

    /// Backend signalled upstream throttling. Carries the optional technical
    /// details and whether the request went through the proxy.
    RateLimited {
        message: String,
        details: Option<String>,
        using_proxy: bool,
    },

    /// Network or decode failure on any endpoint.
    Transport(String),

    /// Failure from the proxy toggle/rotate calls.
    Proxy(String),
}

impl UiError {
    /// Classify a `success=false` message from the metadata path.
    pub fn from_backend_message(msg: &str) -> Self {
        let lower = msg.to_lowercase();
        if lower.contains("invalid") && lower.contains("url") {
            return Self::InvalidUrl(msg.to_string());
        }
        Self::Extraction(msg.to_string())
    }

    /// Message shown in the error panel.
    pub fn message(&self) -> String {
        match self {
            Self::EmptyInput => "Please enter a YouTube URL".to_string(),
            Self::InvalidUrl(msg)
            | Self::Extraction(msg)
            | Self::Transport(msg)
            | Self::Proxy(msg) => msg.clone(),
            Self::RateLimited { message, .. } => message.clone(),
        }
    }

    /// True for the variants that land in the dedicated rate-limit panel
    /// rather than the generic error panel.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UiError {}

impl From<TransportError> for UiError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e.0)
    }
}
