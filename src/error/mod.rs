//! Error types for the Khoj client.
//!
//! - [`ApiError`]: REST calls and anything that talks to the backend
//! - [`StreamError`]: terminal failures of a streamed turn
//!
//! Malformed stream payloads never surface as errors; the decoder degrades
//! them to text events.

mod api;
mod stream;

pub use api::ApiError;
pub use stream::StreamError;

/// Result alias for backend operations.
pub type ApiResult<T> = Result<T, ApiError>;
