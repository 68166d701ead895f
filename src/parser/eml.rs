//! Parser for `.eml` messages (RFC 5322 text without MBOX framing).

use mail_parser::MessageParser;

use crate::error::{AnalyzerError, Result};
use crate::model::message::{RawMessage, StructuredMessage};
use crate::model::target::MessageSet;
use crate::parser::{header, mime};

/// Parse every raw message, keeping the single/batch shape and order.
pub fn parse(raw: MessageSet<RawMessage>) -> Result<MessageSet<StructuredMessage>> {
    raw.try_map(|m| parse_message(&m))
}

/// Parse one raw message into its headers and content tree.
///
/// Byte-level MIME parsing is done by `mail-parser`; a message it rejects is
/// reported as [`AnalyzerError::Parse`].
pub fn parse_message(raw: &RawMessage) -> Result<StructuredMessage> {
    let bytes = header::skip_bom(raw.text.as_bytes());

    let parsed = MessageParser::default()
        .parse(bytes)
        .ok_or_else(|| AnalyzerError::Parse(raw.source.clone()))?;

    // `bytes` came from a `str`, and the BOM is a whole character.
    let text = std::str::from_utf8(bytes).unwrap_or(&raw.text);
    let headers = header::parse_header_block(text);
    let (multipart, parts) = mime::content_tree(&parsed);

    tracing::trace!(
        source = %raw.source.display(),
        headers = headers.len(),
        multipart,
        parts = parts.len(),
        "Parsed message"
    );

    Ok(StructuredMessage {
        source: raw.source.clone(),
        headers,
        multipart,
        parts,
        size: raw.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn raw(name: &str, text: &str) -> RawMessage {
        RawMessage {
            source: PathBuf::from(name),
            text: text.to_string(),
            size: text.len() as u64,
        }
    }

    #[test]
    fn test_parse_plain_message() {
        let msg = parse_message(&raw(
            "a.eml",
            "Subject: Hello\nMessage-ID: <1@x>\nFrom: a@b.com\n\nHi there\n",
        ))
        .unwrap();
        assert_eq!(msg.subject(), Some("Hello"));
        assert_eq!(msg.message_id(), Some("<1@x>"));
        assert_eq!(msg.from(), Some("a@b.com"));
        assert!(!msg.is_multipart());
        assert!(msg.parts.is_empty());
    }

    #[test]
    fn test_parse_strips_bom() {
        let msg = parse_message(&raw("bom.eml", "\u{feff}Subject: BOM\n\nbody\n")).unwrap();
        assert_eq!(msg.subject(), Some("BOM"));
    }

    #[test]
    fn test_parse_keeps_shape_and_order() {
        let set = MessageSet::Batch(vec![
            raw("1.eml", "Subject: one\n\n1\n"),
            raw("2.eml", "Subject: two\n\n2\n"),
        ]);
        let parsed = parse(set).unwrap();
        let subjects: Vec<_> = parsed.iter().map(|m| m.subject().unwrap()).collect();
        assert_eq!(subjects, vec!["one", "two"]);
        assert!(matches!(parsed, MessageSet::Batch(_)));

        let single = parse(MessageSet::Single(raw("s.eml", "Subject: s\n\ns\n"))).unwrap();
        assert!(matches!(single, MessageSet::Single(_)));
    }
}
