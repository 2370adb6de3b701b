use thiserror::Error;

/// Envelope codes shared by every adapter.
pub mod code {
    pub const SUCCESS: i64 = 0;
    pub const TRANSPORT: i64 = 1001;
    pub const DECODE: i64 = 1002;
    pub const EXCHANGE: i64 = 1003;
    pub const UNSUPPORTED: i64 = 1004;
    pub const CONFIGURATION: i64 = 1005;
    pub const SIGNING: i64 = 1006;
}

/// Failure classes of a single request/response round trip.
///
/// Nothing in this enum crosses the public trading interface as an `Err`; adapters fold
/// every variant into an [`ApiResponse`](crate::core::types::ApiResponse).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("{0}")]
    Transport(String),

    #[error("HttpStatusCode:{status}, Desc:{body}")]
    HttpStatus { status: u16, body: String },

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Exchange(String),

    #[error("{0} is not supported by this exchange")]
    Unsupported(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Signing(String),
}

impl ExchangeError {
    /// Numeric envelope code for this failure.
    pub fn code(&self) -> i64 {
        match self {
            Self::Transport(_) => code::TRANSPORT,
            Self::HttpStatus { status, .. } => i64::from(*status),
            Self::Decode(_) => code::DECODE,
            Self::Exchange(_) => code::EXCHANGE,
            Self::Unsupported(_) => code::UNSUPPORTED,
            Self::Configuration(_) => code::CONFIGURATION,
            Self::Signing(_) => code::SIGNING,
        }
    }

    /// Short, stable description used as the envelope `msg`.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Transport(_) => "http client internal error",
            Self::HttpStatus { .. } => "http request error",
            Self::Decode(_) => "http response data unmarshal(json) error",
            Self::Exchange(_) => "exchange api error",
            Self::Unsupported(_) => "method is not exist",
            Self::Configuration(_) => "configuration error",
            Self::Signing(_) => "request signing error",
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported(operation.into())
    }

    pub fn decode(detail: impl std::fmt::Display) -> Self {
        Self::Decode(detail.to_string())
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<crate::core::config::ConfigError> for ExchangeError {
    fn from(err: crate::core::config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
