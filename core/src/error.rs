use thiserror::Error;
use url::ParseError;

/// Error types for the crawl frontier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Error when parsing a URL
    #[error("URL parse error: {0}")]
    UrlParse(#[from] ParseError),

    /// Error raised by a scheduler or its queue storage
    #[error("Scheduler error: {message}")]
    Scheduler {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serde error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new scheduler error
    pub fn scheduler(message: impl Into<String>) -> Self {
        Self::Scheduler {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type for frontier operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serde(error.to_string())
    }
}
