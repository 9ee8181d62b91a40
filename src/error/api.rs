//! REST client error type.

use thiserror::Error;

use super::StreamError;

/// Error type for backend API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned a non-2xx status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// A streamed turn ended with an error
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Response parsed but carried an unusable value
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Operation needs a logged-in session
    #[error("Not logged in. Run `khoj login` or `khoj guest` first.")]
    NotAuthenticated,

    /// Local file access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status of a server error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerError { status, .. } => Some(*status),
            ApiError::Stream(StreamError::Server { status, .. }) => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if retrying the same call could succeed.
    ///
    /// Nothing retries automatically; this only drives the hint shown to the
    /// user.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_connect() || e.is_timeout(),
            ApiError::ServerError { status, .. } => *status >= 500,
            ApiError::Stream(StreamError::Server { status, .. }) => *status >= 500,
            ApiError::Stream(StreamError::Cancelled) => false,
            ApiError::Stream(_) => true,
            ApiError::Json(_)
            | ApiError::InvalidResponse { .. }
            | ApiError::NotAuthenticated
            | ApiError::Io(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_connect() => {
                "Could not reach the server. Check that the backend is running.".to_string()
            }
            ApiError::Http(e) if e.is_timeout() => "The request timed out.".to_string(),
            ApiError::ServerError { status: 401, .. } | ApiError::ServerError { status: 403, .. } => {
                "Authentication error. Please log in again.".to_string()
            }
            ApiError::ServerError { status: 404, .. } => "Not found.".to_string(),
            ApiError::Stream(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Build a [`StreamError`] from a failure to open the stream.
impl From<ApiError> for StreamError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ServerError { status, message } => StreamError::Server { status, message },
            ApiError::Stream(inner) => inner,
            other => StreamError::Connect {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ApiError::ServerError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("500"));
        assert!(display.contains("Internal Server Error"));
    }

    #[test]
    fn test_status() {
        let err = ApiError::ServerError {
            status: 404,
            message: String::new(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::NotAuthenticated.status(), None);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::ServerError {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!ApiError::ServerError {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(!ApiError::NotAuthenticated.is_retryable());
        assert!(ApiError::Stream(StreamError::Transport {
            message: "eof".to_string()
        })
        .is_retryable());
    }

    #[test]
    fn test_user_message_for_auth_failure() {
        let err = ApiError::ServerError {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert!(err.user_message().contains("log in"));
    }

    #[test]
    fn test_into_stream_error() {
        let err: StreamError = ApiError::ServerError {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .into();
        assert_eq!(
            err,
            StreamError::Server {
                status: 502,
                message: "bad gateway".to_string()
            }
        );

        let err: StreamError = ApiError::NotAuthenticated.into();
        assert!(matches!(err, StreamError::Connect { .. }));
    }
}
