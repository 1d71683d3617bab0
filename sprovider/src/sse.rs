//! Incremental parser for `text/event-stream` response bodies.
//!
//! Network chunks arrive with arbitrary boundaries. The parser keeps the
//! unterminated tail of the last chunk and only hands back payloads whose
//! line has been fully received, so a caller never sees half an event.
//!
//! ```rust
//! use sprovider::EventStreamParser;
//!
//! let mut parser = EventStreamParser::new();
//! assert!(parser.feed(b"data: {\"delta\":").is_empty());
//!
//! let events = parser.feed(b"\"hi\"}\n\ndata: [DONE]\n");
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0]["delta"], "hi");
//! ```

use serde_json::Value;

pub const DATA_PREFIX: &str = "data:";
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Default)]
pub struct EventStreamParser {
    buffer: Vec<u8>,
    /// Prefix of `buffer` already known to hold no line terminator.
    scanned: usize,
}

impl EventStreamParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns every complete JSON object payload it
    /// finished, in arrival order.
    ///
    /// Blank lines, non-data lines, the `[DONE]` sentinel and payloads that
    /// do not decode to a JSON object are skipped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(offset) = self.buffer[self.scanned..]
            .iter()
            .position(|byte| *byte == b'\n')
        {
            let newline_index = self.scanned + offset;
            let line = self.buffer.drain(..=newline_index).collect::<Vec<_>>();
            self.scanned = 0;
            if let Some(payload) = decode_line(&line) {
                payloads.push(payload);
            }
        }
        self.scanned = self.buffer.len();

        payloads
    }

    /// Bytes held back waiting for a line terminator.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Ends the stream. A trailing line that never received its terminator
    /// is not parsed; it is returned so the caller can report it.
    pub fn finish(self) -> Option<String> {
        let rest = String::from_utf8_lossy(&self.buffer);
        let rest = rest.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }
}

fn decode_line(line: &[u8]) -> Option<Value> {
    let line = std::str::from_utf8(line).ok()?.trim();
    let payload = line.strip_prefix(DATA_PREFIX)?.trim();
    if payload.is_empty() || payload == DONE_SENTINEL {
        return None;
    }

    serde_json::from_str::<Value>(payload)
        .ok()
        .filter(Value::is_object)
}
