use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for recipe-finder
///
/// Controller operations never surface these to the presentation layer;
/// they show up on configuration loading and on the dispatcher contract,
/// where a stricter client can inspect them.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Dispatch error: {message}")]
    Dispatch {
        code: u16,
        message: String,
        operation: Option<String>,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Request timed out after {elapsed:?}: {message}")]
    Timeout {
        code: u16,
        message: String,
        elapsed: Duration,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl FinderError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCode::CONFIG_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a dispatch error with default code
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            code: ErrorCode::DISPATCH_GENERIC,
            message: message.into(),
            operation: None,
            status: None,
            source: None,
        }
    }

    /// Create a dispatch error with specific code and operation
    pub fn dispatch_with_code(
        code: u16,
        message: impl Into<String>,
        operation: Option<String>,
    ) -> Self {
        Self::Dispatch {
            code,
            message: message.into(),
            operation,
            status: None,
            source: None,
        }
    }

    /// Create a dispatch error for a non-success HTTP status
    pub fn http_status(operation: impl Into<String>, status: u16, body: impl Display) -> Self {
        let operation = operation.into();
        Self::Dispatch {
            code: ErrorCode::DISPATCH_HTTP_STATUS,
            message: format!("{operation} returned HTTP {status}: {body}"),
            operation: Some(operation),
            status: Some(status),
            source: None,
        }
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>, elapsed: Duration) -> Self {
        Self::Timeout {
            code: ErrorCode::DISPATCH_TIMEOUT,
            message: message.into(),
            elapsed,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Dispatch { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::Timeout { .. } => {}
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Dispatch { message, .. }
            | Self::Timeout { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Dispatch { code, .. }
            | Self::Timeout { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Whether a retry could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Dispatch { code, status, .. } => {
                *code == ErrorCode::DISPATCH_TRANSPORT
                    || matches!(status, Some(s) if *s >= 500 || *s == 429)
            }
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::Dispatch {
                message, operation, ..
            } => {
                if let Some(op) = operation {
                    format!("Request '{}' failed: {}", op, message)
                } else {
                    format!("Request failed: {}", message)
                }
            }
            Self::Timeout { elapsed, .. } => {
                format!("The assistant did not answer within {:?}", elapsed)
            }
            Self::Other { message, .. } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for FinderError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_decode() {
            ErrorCode::DISPATCH_MALFORMED_RESPONSE
        } else if err.is_builder() {
            ErrorCode::DISPATCH_CLIENT_BUILD
        } else {
            ErrorCode::DISPATCH_TRANSPORT
        };
        FinderError::Dispatch {
            code,
            message: err.to_string(),
            operation: None,
            status: err.status().map(|s| s.as_u16()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for FinderError {
    fn from(err: toml::de::Error) -> Self {
        FinderError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, err.to_string())
            .with_source(err)
    }
}

impl From<url::ParseError> for FinderError {
    fn from(err: url::ParseError) -> Self {
        FinderError::config_with_code(ErrorCode::CONFIG_INVALID_URL, err.to_string())
            .with_source(err)
    }
}

/// Result type alias using FinderError
pub type Result<T> = std::result::Result<T, FinderError>;
