//! Incremental decoders for vendor streaming formats.
//!
//! Vendors stream either newline-delimited JSON (Ollama) or a labeled event
//! stream (OpenAI-compatible, Anthropic, Gemini). Network reads split the body
//! at arbitrary byte offsets, so both decoders buffer raw bytes and only decode
//! complete lines. A multi-byte UTF-8 sequence cut in half by a read is
//! reassembled before it is decoded.

/// The incremental format a vendor streams in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    /// One JSON object per line.
    Ndjson,
    /// `text/event-stream`, payload in `data:` fields.
    Sse,
}

impl Wire {
    /// Create a payload decoder for this format.
    pub fn decoder(self) -> PayloadDecoder {
        match self {
            Self::Ndjson => PayloadDecoder::Ndjson(LineBuffer::default()),
            Self::Sse => PayloadDecoder::Sse(SseDecoder::default()),
        }
    }
}

/// Splits a byte stream into complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Append bytes and drain every line completed by them.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.buf[start..].iter().position(|b| *b == b'\n') {
            let end = start + pos;
            lines.push(decode_line(&self.buf[start..end]));
            start = end + 1;
        }
        self.buf.drain(..start);
        lines
    }

    /// Take the unterminated trailing line, if any.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let line = decode_line(&self.buf);
        self.buf.clear();
        Some(line)
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// A dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The `event:` label, if the server sent one.
    pub event: Option<String>,
    /// The `data:` lines joined with `\n`.
    pub data: String,
}

/// Event-stream decoder.
///
/// Fields accumulate until a blank line dispatches the event. Comment lines
/// (leading `:`) and unknown fields are ignored.
#[derive(Debug, Default)]
pub struct SseDecoder {
    lines: LineBuffer,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    /// Append bytes and drain every event completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        let lines = self.lines.push(bytes);
        lines.iter().filter_map(|line| self.feed(line)).collect()
    }

    /// Flush the pending event when the connection closes.
    pub fn finish(&mut self) -> Option<SseEvent> {
        if let Some(line) = self.lines.finish()
            && let Some(event) = self.feed(&line)
        {
            return Some(event);
        }
        self.dispatch()
    }

    fn feed(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_owned()),
            "data" => self.data.push(value.to_owned()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent { event, data })
    }
}

/// Yields raw payload strings for either wire format.
#[derive(Debug)]
pub enum PayloadDecoder {
    /// Newline-delimited JSON.
    Ndjson(LineBuffer),
    /// Event stream.
    Sse(SseDecoder),
}

impl PayloadDecoder {
    /// Append bytes and drain every payload completed by them.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        match self {
            Self::Ndjson(lines) => lines
                .push(bytes)
                .into_iter()
                .filter_map(non_blank)
                .collect(),
            Self::Sse(sse) => sse.push(bytes).into_iter().map(|e| e.data).collect(),
        }
    }

    /// Drain whatever the closed connection left behind.
    pub fn finish(&mut self) -> Vec<String> {
        match self {
            Self::Ndjson(lines) => lines.finish().and_then(non_blank).into_iter().collect(),
            Self::Sse(sse) => sse.finish().map(|e| e.data).into_iter().collect(),
        }
    }
}

fn non_blank(line: String) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == line.len() {
        Some(line)
    } else {
        Some(trimmed.to_owned())
    }
}
