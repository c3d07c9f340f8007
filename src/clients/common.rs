use reqwest::StatusCode;
use serde::Deserialize;

use super::beacon::block_body::BlockDecodeError;

/// Error body returned by the beacon node on non-200 responses.
///
/// `code` is the node's own error code, which may differ from the HTTP status.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("beacon API error (code {code}): {message}")]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout or body read failure
    #[error("failed to execute request: {0}")]
    Transport(#[from] reqwest::Error),

    /// API Error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-200 response whose body is not an API error
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Serde Json deser Error
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Url Parsing Error
    #[error("{0}")]
    UrlParse(#[from] url::ParseError),

    #[error(transparent)]
    BlockDecode(#[from] BlockDecodeError),

    /// Other Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Classifies a non-200 response body.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiError>(body) {
            Ok(api_error) => Self::Api(api_error),
            Err(_) => Self::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api_error) => Some(api_error),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.api_error(), Some(ApiError { code: 404, .. }))
    }
}
