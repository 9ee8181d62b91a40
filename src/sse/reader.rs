//! Async event-stream reader.
//!
//! Adapts a chunked byte stream (typically `reqwest::Response::bytes_stream`)
//! into an ordered stream of [`StreamItem`]s. Completion and failure are
//! values of the stream rather than callbacks.

use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

use super::decoder::{decode_frame, DecodedFrame};
use super::events::StreamEvent;
use super::frame::FrameSplitter;
use crate::error::StreamError;

/// One item of a decoded event stream.
///
/// A stream yields any number of `Event`s followed by exactly one terminal
/// item (`Complete` or `Error`), after which it ends.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    /// A decoded frame payload
    Event(StreamEvent),
    /// Logical end of stream: `[DONE]` sentinel or transport EOF
    Complete,
    /// Transport failure; no more items follow
    Error(StreamError),
}

impl StreamItem {
    /// Check if this item ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamItem::Complete | StreamItem::Error(_))
    }
}

/// Boxed stream of decoded items.
pub type EventStream = Pin<Box<dyn Stream<Item = StreamItem> + Send>>;

struct ReaderState<S> {
    bytes: Pin<Box<S>>,
    splitter: FrameSplitter,
    ready: VecDeque<StreamItem>,
    finished: bool,
}

impl<S> ReaderState<S> {
    /// Decode a frame into the ready queue. Returns `false` once the sentinel
    /// has been seen; later frames are discarded.
    fn accept_frame(&mut self, frame: &str) -> bool {
        if self.finished {
            return false;
        }
        match decode_frame(frame) {
            DecodedFrame::Skip => {
                tracing::debug!("Skipping SSE frame without data");
            }
            DecodedFrame::Done => {
                tracing::debug!("Received [DONE] sentinel");
                self.finish(StreamItem::Complete);
                return false;
            }
            DecodedFrame::Event(event) => {
                tracing::debug!("SSE event: {}", event.kind());
                self.ready.push_back(StreamItem::Event(event));
            }
        }
        true
    }

    fn finish(&mut self, terminal: StreamItem) {
        if !self.finished {
            self.finished = true;
            self.ready.push_back(terminal);
        }
    }
}

/// Turn a chunked byte stream into a stream of decoded events.
///
/// Reads are only issued when every already-decoded item has been consumed,
/// so the caller suspends solely on transport latency. After the terminal
/// item no further reads happen; dropping the returned stream drops the
/// underlying body and aborts the transfer.
pub fn event_stream<S, E>(bytes: S) -> EventStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send,
{
    let state = ReaderState {
        bytes: Box::pin(bytes),
        splitter: FrameSplitter::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    let items = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.ready.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    for frame in state.splitter.push(&chunk) {
                        if !state.accept_frame(&frame) {
                            break;
                        }
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("SSE transport error: {}", e);
                    state.finish(StreamItem::Error(StreamError::Transport {
                        message: e.to_string(),
                    }));
                }
                None => {
                    if let Some(frame) = state.splitter.finish() {
                        tracing::debug!("Flushing unterminated SSE frame at EOF");
                        state.accept_frame(&frame);
                    }
                    if !state.finished {
                        tracing::debug!("SSE transport closed without [DONE]");
                    }
                    state.finish(StreamItem::Complete);
                }
            }
        }
    });

    Box::pin(items)
}
