use thiserror::Error;

/// Errors returned by [`crate::WallabagClient`].
#[derive(Error, Debug)]
pub enum WallabagError {
    /// Transport failure, timeout, or client construction error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status other than 200.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The token endpoint answered 200 with a body we cannot use.
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),
}

impl WallabagError {
    /// HTTP status carried by a [`WallabagError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            WallabagError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
