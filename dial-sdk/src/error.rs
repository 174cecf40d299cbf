use dial_client::ApplicationError;
use thiserror::Error;

/// Failure of a request the caller explicitly made.
#[derive(Error, Debug)]
pub enum DialClientError {
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("The application doesn't support stopping: {0}")]
    StopNotAllowed(String),

    #[error("Device has no application URL: {0}")]
    DeviceNotResolved(String),
}

impl DialClientError {
    /// HTTP status returned by the server, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            DialClientError::Application(error) => error.status(),
            _ => None,
        }
    }
}

/// Convenience Result alias for session operations.
pub type Result<T> = std::result::Result<T, DialClientError>;
