use reqwest::StatusCode;
use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, body decode failure and the like.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        code: Option<ErrorCode>,
    },
    #[error("invalid page url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid page location: {0}")]
    InvalidLocation(String),
}
