//! Error types for the application-control client

use thiserror::Error;

/// Errors that can occur while talking to a DIAL application resource
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Network, transport or I/O failure before a usable response arrived
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The server answered a mutating request with a non-2xx status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The server answered with a document that violates the DIAL schema
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A URL could not be composed or a header carried an unparsable URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApplicationError {
    /// True for failures of the transport rather than of the protocol exchange.
    pub fn is_network(&self) -> bool {
        matches!(self, ApplicationError::Network(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApplicationError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApplicationError {
    fn from(error: url::ParseError) -> Self {
        ApplicationError::InvalidUrl(error.to_string())
    }
}

/// Convenience Result alias for application-control operations.
pub type Result<T> = std::result::Result<T, ApplicationError>;
