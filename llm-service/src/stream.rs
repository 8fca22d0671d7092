//! Accumulator for Ollama's newline-delimited JSON stream.
//!
//! The generation endpoint emits one JSON object per line, each
//! optionally carrying a `response` fragment. Chunks from the
//! transport do not align with line boundaries, so the accumulator
//! buffers raw bytes across chunks and only decodes complete lines;
//! decoding per chunk would mangle a multi-byte UTF-8 character that
//! straddles a chunk boundary. A line that fails to parse is dropped
//! and streaming continues; parse failure is framing noise, not a
//! stream failure.

use serde::Deserialize;
use tracing::trace;

/// One NDJSON line from `/api/generate`.
///
/// Only `response` matters here; `done` and the stats fields on the
/// final line are ignored.
#[derive(Debug, Deserialize)]
struct StreamFragment {
    response: Option<String>,
}

/// Accumulates `response` fragments from a chunked NDJSON body.
#[derive(Debug, Default)]
pub(crate) struct FragmentAccumulator {
    /// Raw bytes of the partial line carried over between chunks.
    pending: Vec<u8>,
    /// Concatenated answer so far, in arrival order.
    output: String,
}

impl FragmentAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feeds one transport chunk, draining every complete line in it.
    ///
    /// Bytes stay buffered until a newline arrives, so UTF-8 sequences
    /// split across chunks are reassembled before decoding.
    pub(crate) fn push_chunk(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            self.push_line(line.trim_end_matches(['\n', '\r']));
        }
    }

    /// Consumes one line; malformed JSON is skipped silently.
    pub(crate) fn push_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        match serde_json::from_str::<StreamFragment>(line) {
            Ok(StreamFragment {
                response: Some(text),
            }) => self.output.push_str(&text),
            Ok(StreamFragment { response: None }) => {}
            Err(_) => trace!("skipping malformed stream line"),
        }
    }

    /// Flushes any trailing unterminated line and returns the trimmed
    /// accumulated answer.
    pub(crate) fn finish(mut self) -> String {
        if !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            let tail = String::from_utf8_lossy(&tail);
            self.push_line(tail.trim_end_matches(['\n', '\r']));
        }
        self.output.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_fragments_in_arrival_order() {
        let mut acc = FragmentAccumulator::new();
        acc.push_line(r#"{"response":"Hel"}"#);
        acc.push_line("garbage");
        acc.push_line(r#"{"response":"lo"}"#);
        assert_eq!(acc.finish(), "Hello");
    }

    #[test]
    fn lines_without_response_field_are_ignored() {
        let mut acc = FragmentAccumulator::new();
        acc.push_line(r#"{"response":"hi"}"#);
        acc.push_line(r#"{"done":true,"total_duration":123}"#);
        assert_eq!(acc.finish(), "hi");
    }

    #[test]
    fn lines_split_across_chunks_are_reassembled() {
        let mut acc = FragmentAccumulator::new();
        acc.push_chunk(br#"{"response":"He"#);
        acc.push_chunk(b"llo\"}\n{\"response\":\" there\"}\n");
        assert_eq!(acc.finish(), "Hello there");
    }

    #[test]
    fn multibyte_character_split_across_chunks_stays_intact() {
        let line = "{\"response\":\"café\"}\n".as_bytes();
        // Split inside the two-byte encoding of 'é' (the last four
        // bytes are the second half of 'é', then `"}` and newline).
        let split = line.len() - 4;
        let mut acc = FragmentAccumulator::new();
        acc.push_chunk(&line[..split]);
        acc.push_chunk(&line[split..]);
        assert_eq!(acc.finish(), "café");
    }

    #[test]
    fn emoji_split_across_three_chunks_stays_intact() {
        let line = "{\"response\":\"ok 🦀\"}\n".as_bytes();
        // Feed byte-by-byte; every boundary lands inside some UTF-8
        // sequence at least once.
        let mut acc = FragmentAccumulator::new();
        for b in line {
            acc.push_chunk(std::slice::from_ref(b));
        }
        assert_eq!(acc.finish(), "ok 🦀");
    }

    #[test]
    fn trailing_line_without_newline_is_flushed() {
        let mut acc = FragmentAccumulator::new();
        acc.push_chunk(br#"{"response":"tail"}"#);
        assert_eq!(acc.finish(), "tail");
    }

    #[test]
    fn result_is_whitespace_trimmed() {
        let mut acc = FragmentAccumulator::new();
        acc.push_line(r#"{"response":"  answer "}"#);
        acc.push_line(r#"{"response":" \n"}"#);
        assert_eq!(acc.finish(), "answer");
    }

    #[test]
    fn empty_stream_yields_empty_answer() {
        assert_eq!(FragmentAccumulator::new().finish(), "");
    }

    #[test]
    fn empty_and_crlf_lines_are_tolerated() {
        let mut acc = FragmentAccumulator::new();
        acc.push_chunk(b"\r\n{\"response\":\"ok\"}\r\n\n");
        assert_eq!(acc.finish(), "ok");
    }
}
