/// Error types for the gallery client
///
/// Every failure in this application is recoverable: it is logged and shown
/// to the user as a notification. `ApiError` is `Clone` because it travels
/// inside iced messages, so the underlying library errors are flattened to
/// their display text at the boundary.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure: DNS, refused connection, timeout
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The response body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("file error: {0}")]
    Io(String),

    /// An image could not be decoded
    #[error("image error: {0}")]
    Image(String),

    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    /// True when the failure means the backend is unreachable
    pub fn is_offline(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                endpoint: err
                    .url()
                    .map(|u| u.path().to_string())
                    .unwrap_or_default(),
                status: status.as_u16(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err.to_string())
    }
}

impl From<image::ImageError> for ApiError {
    fn from(err: image::ImageError) -> Self {
        ApiError::Image(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Url(err.to_string())
    }
}

/// Failures while loading `config.json`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),
}
