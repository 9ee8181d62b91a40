//! Buffered frame splitter.
//!
//! Turns an arbitrarily chunked byte stream into whole SSE frames. A frame is
//! everything up to a blank line; `\r\n` line endings are normalized to `\n`
//! so both framings split identically.

/// Frame terminator after line-ending normalization.
const FRAME_TERMINATOR: &str = "\n\n";

/// Stateful splitter that accumulates chunks and emits complete frames.
///
/// The splitter is transport-independent: feed it whatever the transport
/// delivers with [`FrameSplitter::push`] and call [`FrameSplitter::finish`]
/// once the transport reaches end-of-stream.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    /// Decoded text not yet terminated by a blank line
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending: Vec<u8>,
}

impl FrameSplitter {
    /// Create a new, empty splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every frame it completes, in order.
    ///
    /// The last, possibly incomplete, frame is held until a later chunk
    /// terminates it or [`FrameSplitter::finish`] flushes it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        self.decode_pending();
        self.normalize_line_endings();
        self.drain_frames()
    }

    /// Flush the held-over buffer at end-of-stream.
    ///
    /// Returns `None` when nothing but whitespace is left.
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.buffer.push_str(&String::from_utf8_lossy(&rest));
        }

        // push() already drained every terminated frame
        let leftover = std::mem::take(&mut self.buffer);
        if leftover.trim().is_empty() {
            return None;
        }
        Some(leftover.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Number of bytes currently held back, decoded or not.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() + self.pending.len()
    }

    /// Clear all buffered state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending.clear();
    }

    /// Move every complete UTF-8 sequence from `pending` into `buffer`.
    fn decode_pending(&mut self) {
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    self.pending.clear();
                    return;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    // valid_up_to guarantees this prefix is well-formed
                    if let Ok(text) = std::str::from_utf8(&self.pending[..valid]) {
                        self.buffer.push_str(text);
                    }
                    match e.error_len() {
                        // Incomplete sequence at the end: wait for more bytes
                        None => {
                            self.pending.drain(..valid);
                            return;
                        }
                        Some(bad) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                    }
                }
            }
        }
    }

    fn normalize_line_endings(&mut self) {
        if self.buffer.contains("\r\n") {
            self.buffer = self.buffer.replace("\r\n", "\n");
        }
    }

    fn drain_frames(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.find(FRAME_TERMINATOR) {
            let frame: String = self.buffer.drain(..pos + FRAME_TERMINATOR.len()).collect();
            let frame = &frame[..pos];
            if !frame.trim().is_empty() {
                frames.push(frame.to_string());
            }
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(b"data: {\"type\":\"done\"}\n\n");
        assert_eq!(frames, vec!["data: {\"type\":\"done\"}".to_string()]);
        assert_eq!(splitter.buffered_len(), 0);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.push(b"data: {\"type\":").is_empty());
        assert!(splitter.push(b"\"done\"}\n").is_empty());
        let frames = splitter.push(b"\n");
        assert_eq!(frames, vec!["data: {\"type\":\"done\"}".to_string()]);
    }

    #[test]
    fn test_multiple_frames_in_one_chunk() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(b"data: a\n\ndata: b\n\ndata: c");
        assert_eq!(frames, vec!["data: a".to_string(), "data: b".to_string()]);
        assert_eq!(splitter.finish(), Some("data: c".to_string()));
    }

    #[test]
    fn test_finish_flushes_leftover() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.push(b"data: tail\n").is_empty());
        assert_eq!(splitter.finish(), Some("data: tail".to_string()));
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_empty_input_produces_nothing() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.push(b"").is_empty());
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_whitespace_only_frames_dropped() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(b"\n\n\n\ndata: x\n\n  \n\n");
        assert_eq!(frames, vec!["data: x".to_string()]);
    }

    #[test]
    fn test_crlf_framing() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(b"data: a\r\n\r\ndata: b\r\n\r\n");
        assert_eq!(frames, vec!["data: a".to_string(), "data: b".to_string()]);
    }

    #[test]
    fn test_crlf_split_between_cr_and_lf() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.push(b"data: a\r\n\r").is_empty());
        let frames = splitter.push(b"\ndata: b");
        assert_eq!(frames, vec!["data: a".to_string()]);
    }

    #[test]
    fn test_utf8_sequence_split_across_chunks() {
        let text = "data: héllo\n\n".as_bytes();
        // 'é' is two bytes; split between them
        let split = "data: h".len() + 1;
        let mut splitter = FrameSplitter::new();
        assert!(splitter.push(&text[..split]).is_empty());
        let frames = splitter.push(&text[split..]);
        assert_eq!(frames, vec!["data: héllo".to_string()]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut splitter = FrameSplitter::new();
        let frames = splitter.push(b"data: a\xffb\n\n");
        assert_eq!(frames, vec!["data: a\u{FFFD}b".to_string()]);
    }

    #[test]
    fn test_truncated_utf8_at_eof_is_flushed_lossily() {
        let mut splitter = FrameSplitter::new();
        assert!(splitter.push(b"data: \xc3").is_empty());
        assert_eq!(splitter.finish(), Some("data: \u{FFFD}".to_string()));
    }

    #[test]
    fn test_reset() {
        let mut splitter = FrameSplitter::new();
        splitter.push(b"data: partial");
        splitter.reset();
        assert_eq!(splitter.buffered_len(), 0);
        assert_eq!(splitter.finish(), None);
    }
}
