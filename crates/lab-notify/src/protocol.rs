//! Wire format of the notification hub.
//!
//! The hub speaks the SignalR JSON hub protocol: every message is a JSON
//! object terminated by the ASCII record separator `0x1e`. Server-to-client
//! traffic rides a Server-Sent Events stream, where each `data:` event
//! carries one or more records.
//!
//! | type | meaning    |
//! |------|------------|
//! | 1    | invocation (`target` + `arguments`) |
//! | 6    | ping       |
//! | 7    | close (`error`, `allowReconnect`)   |

use serde::Deserialize;
use serde_json::Value;

use crate::error::NotifyError;

/// Terminates every hub record.
pub const RECORD_SEPARATOR: char = '\u{1e}';

/// First record the client sends after opening the stream.
pub const HANDSHAKE_REQUEST: &str = "{\"protocol\":\"json\",\"version\":1}\u{1e}";

/// Keep-alive record, sent in both directions.
pub const PING: &str = "{\"type\":6}\u{1e}";

/// Invocation target that delivers one notification.
pub const RECEIVE_NOTIFICATION: &str = "ReceiveNotification";

/// A decoded hub message.
#[derive(Debug, Clone, PartialEq)]
pub enum HubMessage {
    Invocation { target: String, arguments: Vec<Value> },
    Ping,
    Close {
        error: Option<String>,
        allow_reconnect: bool,
    },
    /// Stream items, completions and anything newer; ignored.
    Other(u8),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMessage {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    arguments: Vec<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    allow_reconnect: bool,
}

/// Decode one record (without its separator).
///
/// # Errors
///
/// [`NotifyError::Protocol`] when the record is not a hub message.
pub fn decode(record: &str) -> Result<HubMessage, NotifyError> {
    let raw: RawMessage = serde_json::from_str(record)
        .map_err(|e| NotifyError::Protocol(format!("bad record {record:?}: {e}")))?;
    Ok(match raw.kind {
        1 => HubMessage::Invocation {
            target: raw
                .target
                .ok_or_else(|| NotifyError::Protocol("invocation without target".into()))?,
            arguments: raw.arguments,
        },
        6 => HubMessage::Ping,
        7 => HubMessage::Close {
            error: raw.error,
            allow_reconnect: raw.allow_reconnect,
        },
        other => HubMessage::Other(other),
    })
}

/// Check the server's handshake response: `{}` or `{"error": ".."}`.
///
/// # Errors
///
/// [`NotifyError::Handshake`] when the server refused or sent garbage.
pub fn check_handshake(record: &str) -> Result<(), NotifyError> {
    let value: Value = serde_json::from_str(record)
        .map_err(|e| NotifyError::Handshake(format!("bad response {record:?}: {e}")))?;
    match value.get("error").and_then(Value::as_str) {
        Some(error) => Err(NotifyError::Handshake(error.to_string())),
        None => Ok(()),
    }
}

/// Splits text into `0x1e`-terminated records, buffering a partial tail.
#[derive(Debug, Default)]
pub struct RecordSplitter {
    pending: String,
}

impl RecordSplitter {
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.pending.push_str(text);
        let mut records = Vec::new();
        while let Some(end) = self.pending.find(RECORD_SEPARATOR) {
            let record: String = self.pending.drain(..=end).collect();
            let record = record.trim_end_matches(RECORD_SEPARATOR).trim();
            if !record.is_empty() {
                records.push(record.to_string());
            }
        }
        records
    }
}

/// Incremental Server-Sent Events decoder.
///
/// Feed it raw body chunks; it returns the `data` of every completed event.
/// Multi-line data is joined with `\n`, comments and other fields are
/// dropped. Chunks may split lines and UTF-8 sequences anywhere.
#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    data: Option<String>,
}

impl SseDecoder {
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut events = Vec::new();
        for &byte in chunk {
            if byte == b'\n' {
                let line = std::mem::take(&mut self.line);
                let line = String::from_utf8_lossy(&line);
                let line = line.strip_suffix('\r').unwrap_or(&line);
                if let Some(event) = self.line_done(line) {
                    events.push(event);
                }
            } else {
                self.line.push(byte);
            }
        }
        events
    }

    fn line_done(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.data.take();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            match &mut self.data {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn splitter_buffers_partial_records() {
        let mut splitter = RecordSplitter::default();
        assert!(splitter.push("{\"type\":").is_empty());
        assert_eq!(
            splitter.push("6}\u{1e}{\"type\":6}\u{1e}{\"ty"),
            vec!["{\"type\":6}".to_string(), "{\"type\":6}".to_string()]
        );
        assert_eq!(splitter.push("pe\":6}\u{1e}"), vec!["{\"type\":6}".to_string()]);
    }

    #[test]
    fn sse_decoder_joins_chunks_and_multiline_data() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.feed(b": keep-alive\n\nda").is_empty());
        assert!(decoder.feed(b"ta: {}\x1e\r\n").is_empty());
        assert_eq!(decoder.feed(b"\r\n"), vec!["{}\u{1e}".to_string()]);

        let events = decoder.feed(b"data: a\ndata: b\nid: 3\n\n");
        assert_eq!(events, vec!["a\nb".to_string()]);
    }

    #[test]
    fn sse_decoder_survives_split_utf8() {
        let text = "data: Thông báo\n\n".as_bytes();
        let (head, tail) = text.split_at(9);
        let mut decoder = SseDecoder::default();
        assert!(decoder.feed(head).is_empty());
        assert_eq!(decoder.feed(tail), vec!["Thông báo".to_string()]);
    }

    #[test]
    fn decodes_notification_invocation() {
        let record = r#"{"type":1,"target":"ReceiveNotification","arguments":[{"id":"n1"}]}"#;
        let message = decode(record).unwrap();
        assert_eq!(
            message,
            HubMessage::Invocation {
                target: RECEIVE_NOTIFICATION.into(),
                arguments: vec![serde_json::json!({"id": "n1"})],
            }
        );
    }

    #[rstest]
    #[case(r#"{"type":6}"#, HubMessage::Ping)]
    #[case(r#"{"type":7}"#, HubMessage::Close { error: None, allow_reconnect: false })]
    #[case(
        r#"{"type":7,"error":"Server shutting down","allowReconnect":true}"#,
        HubMessage::Close { error: Some("Server shutting down".into()), allow_reconnect: true }
    )]
    #[case(r#"{"type":3,"invocationId":"1"}"#, HubMessage::Other(3))]
    fn decodes_control_messages(#[case] record: &str, #[case] expected: HubMessage) {
        assert_eq!(decode(record).unwrap(), expected);
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        assert!(matches!(decode("not json"), Err(NotifyError::Protocol(_))));
        assert!(matches!(decode(r#"{"type":1}"#), Err(NotifyError::Protocol(_))));
    }

    #[test]
    fn handshake_response() {
        assert!(check_handshake("{}").is_ok());
        let err = check_handshake(r#"{"error":"Requested protocol 'json' is not available."}"#)
            .unwrap_err();
        assert!(err.to_string().contains("not available"));
    }
}
