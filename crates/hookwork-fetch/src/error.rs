use std::time::Duration;

use thiserror::Error;

/// Why a fetch did not produce a value.
///
/// Payloads are rendered strings so the error stays `Clone` and can live in
/// view state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("request failed with status {0}")]
    Status(u16),

    /// Body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    Decode(String),

    /// Body is JSON but not the expected shape.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request was dropped before it completed.
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Whether the server was reached and answered.
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            FetchError::Status(_) | FetchError::Decode(_) | FetchError::Shape(_)
        )
    }
}
