//! MIME structure: converts a `mail-parser` message into our [`Part`] tree.

use mail_parser::{Message, MessagePart, MessagePartId, MimeHeaders, PartType};

use crate::model::message::Part;

/// Maximum depth for recursive multipart descent (to prevent stack overflow on adversarial input).
const MAX_DEPTH: usize = 32;

/// Top-level body shape of a parsed message: `(is_multipart, child parts)`.
pub fn content_tree(msg: &Message<'_>) -> (bool, Vec<Part>) {
    match msg.parts.first().map(|root| &root.body) {
        Some(PartType::Multipart(ids)) => (true, children(msg, ids, 0)),
        _ => (false, Vec::new()),
    }
}

fn children(msg: &Message<'_>, ids: &[MessagePartId], depth: usize) -> Vec<Part> {
    if depth >= MAX_DEPTH {
        tracing::warn!(depth, "Multipart nesting too deep, ignoring remaining parts");
        return Vec::new();
    }
    ids.iter()
        .filter_map(|&id| msg.parts.get(id as usize))
        .map(|part| build_part(msg, part, depth))
        .collect()
}

fn build_part(msg: &Message<'_>, part: &MessagePart<'_>, depth: usize) -> Part {
    let content_type = part
        .content_type()
        .map(|ct| match ct.subtype() {
            Some(sub) => format!("{}/{}", ct.ctype(), sub),
            None => ct.ctype().to_string(),
        })
        .unwrap_or_else(|| "text/plain".to_string())
        .to_ascii_lowercase();

    let disposition = part
        .content_disposition()
        .map(|d| d.ctype().to_ascii_lowercase());

    let filename = part.attachment_name().map(String::from);

    let (payload, nested) = match &part.body {
        PartType::Multipart(ids) => (None, children(msg, ids, depth + 1)),
        PartType::Message(inner) => {
            // An attached message/rfc822 is walked like the outer message.
            let (_, nested) = content_tree(inner);
            (Some(part.contents().to_vec()), nested)
        }
        _ => (Some(part.contents().to_vec()), Vec::new()),
    };

    Part {
        content_type,
        disposition,
        filename,
        payload,
        children: nested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mail_parser::MessageParser;

    const MIXED: &str = "From: a@b.com\r\n\
Subject: Mixed\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/mixed; boundary=\"outer\"\r\n\
\r\n\
--outer\r\n\
Content-Type: multipart/alternative; boundary=\"inner\"\r\n\
\r\n\
--inner\r\n\
Content-Type: text/plain\r\n\
\r\n\
plain body\r\n\
--inner\r\n\
Content-Type: text/html\r\n\
\r\n\
<p>html body</p>\r\n\
--inner--\r\n\
--outer\r\n\
Content-Type: text/plain; name=\"notes.txt\"\r\n\
Content-Disposition: attachment; filename=\"notes.txt\"\r\n\
\r\n\
attached notes\r\n\
--outer--\r\n";

    #[test]
    fn test_plain_message_has_no_parts() {
        let msg = MessageParser::default()
            .parse(b"Subject: hi\r\n\r\nhello\r\n".as_slice())
            .unwrap();
        let (multipart, parts) = content_tree(&msg);
        assert!(!multipart);
        assert!(parts.is_empty());
    }

    #[test]
    fn test_nested_multipart_tree() {
        let msg = MessageParser::default().parse(MIXED.as_bytes()).unwrap();
        let (multipart, parts) = content_tree(&msg);
        assert!(multipart);
        assert_eq!(parts.len(), 2);

        let alt = &parts[0];
        assert_eq!(alt.content_type, "multipart/alternative");
        assert!(alt.payload.is_none());
        assert_eq!(alt.children.len(), 2);
        assert_eq!(alt.children[1].content_type, "text/html");

        let att = &parts[1];
        assert!(att.is_attachment());
        assert_eq!(att.filename.as_deref(), Some("notes.txt"));
        let payload = att.payload.as_deref().unwrap();
        assert!(String::from_utf8_lossy(payload).contains("attached notes"));
    }
}
