use std::fmt;

use isg_core::ConfigError;
use thiserror::Error;

/// Transport failure of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode { encoding: String },
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode { encoding } => write!(f, "body not decodable as {encoding}"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Errors raised while assembling the engine. All of them are fatal.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid metric configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid base url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("invalid header `{name}`: {message}")]
    InvalidHeader { name: String, message: String },
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("invalid table selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("could not start runtime: {0}")]
    Runtime(String),
    #[error("engine worker stopped")]
    Stopped,
}
