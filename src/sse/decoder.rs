//! Frame decoding.
//!
//! A frame is one or more lines. Only `data:` lines carry payload; comments
//! (`:` prefix, used for keep-alives) and the other SSE fields are skipped.

use super::events::StreamEvent;

/// Prefix of payload-carrying lines.
pub const DATA_PREFIX: &str = "data:";

/// Payload marking the logical end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Result of decoding one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedFrame {
    /// Frame had no data lines
    Skip,
    /// The `[DONE]` sentinel
    Done,
    /// A payload event (typed, unknown, or raw text)
    Event(StreamEvent),
}

/// Extract the payload of a frame.
///
/// Every `data:` line contributes its content (one optional space after the
/// colon is stripped); lines are rejoined with `\n`. Returns `None` when the
/// frame has no data lines.
pub fn extract_data(frame: &str) -> Option<String> {
    let mut lines = frame
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
        .peekable();

    lines.peek()?;
    Some(lines.collect::<Vec<_>>().join("\n"))
}

/// Decode one frame into an event, the sentinel, or nothing.
pub fn decode_frame(frame: &str) -> DecodedFrame {
    let Some(data) = extract_data(frame) else {
        return DecodedFrame::Skip;
    };

    if data.trim() == DONE_SENTINEL {
        return DecodedFrame::Done;
    }

    let event = StreamEvent::parse(&data);
    if let StreamEvent::Text(ref raw) = event {
        tracing::warn!("Non-JSON SSE payload kept as text ({} bytes)", raw.len());
    }
    DecodedFrame::Event(event)
}
