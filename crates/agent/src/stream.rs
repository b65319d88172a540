//! Decoding of the agent runtime's event stream.
//!
//! The response body is newline-delimited. Lines carrying an event start
//! with `data: ` followed by a JSON object; text fragments live at
//! `event.contentBlockDelta.delta.text`. Anything else (blank lines,
//! comments, padding, non-JSON payloads, other event kinds) is skipped.

use serde::Deserialize;
use tracing::trace;

const DATA_PREFIX: &str = "data: ";

#[derive(Debug, Deserialize)]
struct StreamEnvelope {
    #[serde(default)]
    event: Option<StreamEvent>,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(default, rename = "contentBlockDelta")]
    content_block_delta: Option<ContentBlockDelta>,
}

#[derive(Debug, Deserialize)]
struct ContentBlockDelta {
    #[serde(default)]
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the text fragment carried by one stream line, if any.
pub fn parse_event_line(line: &str) -> Option<String> {
    let data = line.trim_end_matches('\r').strip_prefix(DATA_PREFIX)?;

    match serde_json::from_str::<StreamEnvelope>(data) {
        Ok(envelope) => envelope
            .event?
            .content_block_delta?
            .delta?
            .text,
        Err(e) => {
            trace!(data = %data, error = %e, "Ignoring unparseable stream line");
            None
        }
    }
}

/// Incremental line decoder; chunks may split lines anywhere.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: String,
    text: String,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk; returns the fragments completed by it, in order.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let mut fragments = Vec::new();
        while let Some(line_end) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=line_end).collect();
            if let Some(fragment) = parse_event_line(line.trim_end_matches('\n')) {
                self.text.push_str(&fragment);
                fragments.push(fragment);
            }
        }
        fragments
    }

    /// Flush a final unterminated line and return the accumulated text.
    pub fn finish(mut self) -> (Vec<String>, String) {
        let rest = std::mem::take(&mut self.buffer);
        let mut fragments = Vec::new();
        if let Some(fragment) = parse_event_line(&rest) {
            self.text.push_str(&fragment);
            fragments.push(fragment);
        }
        (fragments, self.text)
    }
}

/// Decode a whole response body, reporting each fragment as it is found.
pub fn decode_body<F>(body: &str, mut on_text: F) -> String
where
    F: FnMut(&str),
{
    let mut decoder = StreamDecoder::new();
    for fragment in decoder.push(body) {
        on_text(&fragment);
    }
    let (tail, text) = decoder.finish();
    for fragment in tail {
        on_text(&fragment);
    }
    text
}
