//! Application error types

use folio_domain::{ArticlesError, LoginError, StatusCode};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Failure of a single resource request, before domain translation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// No response was obtained.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A response started but could not be read.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The server answered with a 4xx status.
    #[error("unauthorized: {status}")]
    Unauthorized {
        /// The exact status received.
        status: StatusCode,
    },

    /// The server answered with a status outside `[200, 500)`.
    #[error("data loading failed with status {status_code}")]
    DataLoading {
        /// The exact status received.
        status_code: u16,
        /// Raw response body.
        body: Vec<u8>,
    },

    /// A 2xx body did not match the expected type.
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl From<HttpClientError> for TransportError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::Send(_) | HttpClientError::Timeout { .. } => {
                Self::InvalidRequest(error.to_string())
            }
            HttpClientError::ReadBody(_) => Self::InvalidResponse(error.to_string()),
        }
    }
}

impl From<TransportError> for ArticlesError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Unauthorized { .. } => Self::ExpiredToken,
            TransportError::InvalidRequest(_)
            | TransportError::InvalidResponse(_)
            | TransportError::DataLoading { .. }
            | TransportError::Decode(_) => Self::Generic,
        }
    }
}

impl From<TransportError> for LoginError {
    fn from(_: TransportError) -> Self {
        Self::InvalidData
    }
}
