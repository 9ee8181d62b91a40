//! SSE (Server-Sent Events) stream client for the search pipeline.
//!
//! The backend streams `data: <payload>\n\n` frames where the payload is
//! either the `[DONE]` sentinel or a JSON object tagged with a `type` field.
//!
//! # Module structure
//! - `events` - Event type definitions (StreamEvent, PipelineEvent, Phase)
//! - `frame` - Transport-independent buffered frame splitter
//! - `decoder` - Frame → event decoding (data prefix, sentinel, JSON fallback)
//! - `reader` - Async adapter from a byte stream to a stream of `StreamItem`s

mod decoder;
mod events;
mod frame;
mod reader;

pub use decoder::{decode_frame, extract_data, DecodedFrame, DATA_PREFIX, DONE_SENTINEL};
pub use events::{Phase, PipelineEvent, StreamEvent};
pub use frame::FrameSplitter;
pub use reader::{event_stream, EventStream, StreamItem};
