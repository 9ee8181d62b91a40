//! Streaming-related error types.
//!
//! These errors end a streamed turn. Payload problems never show up here:
//! undecodable frames degrade to text events instead.

use thiserror::Error;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The stream could not be opened (connection refused, DNS, ...).
    #[error("Failed to open stream: {message}")]
    Connect { message: String },

    /// The server answered the stream request with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Reading the body failed after the stream was established.
    #[error("Stream interrupted: {message}")]
    Transport { message: String },

    /// The turn was cancelled locally before it finished.
    #[error("Stream cancelled")]
    Cancelled,
}

impl StreamError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::Connect { .. } => {
                "Could not reach the server. Check that the backend is running.".to_string()
            }
            StreamError::Server { status, .. } if *status >= 500 => {
                format!("The server failed to process the request ({}).", status)
            }
            StreamError::Server { status, message } => {
                format!("The server rejected the request ({}): {}", status, message)
            }
            StreamError::Transport { .. } => {
                "Connection to the server was lost mid-response.".to_string()
            }
            StreamError::Cancelled => "Cancelled.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StreamError::Server {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");

        let err = StreamError::Transport {
            message: "reset".to_string(),
        };
        assert_eq!(err.to_string(), "Stream interrupted: reset");
    }

    #[test]
    fn test_user_message_distinguishes_client_and_server_errors() {
        let server = StreamError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(server.user_message().contains("500"));

        let client = StreamError::Server {
            status: 400,
            message: "prompt missing".to_string(),
        };
        assert!(client.user_message().contains("prompt missing"));
    }
}
