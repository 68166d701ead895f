//! Raw and parsed message types.

use std::path::PathBuf;

/// The decoded text of one message file, before MIME parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// File the text was read from.
    pub source: PathBuf,
    /// Full message text (headers + body).
    pub text: String,
    /// On-disk length of the file in bytes.
    pub size: u64,
}

/// Header fields in document order with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header. Earlier values win on lookup.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`, compared ASCII case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed message: top-level headers plus the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredMessage {
    /// File the message was read from.
    pub source: PathBuf,
    /// Top-level headers.
    pub headers: HeaderMap,
    /// `true` if the top-level body is `multipart/*`.
    pub multipart: bool,
    /// Child parts of the top-level body. Empty unless `multipart`.
    pub parts: Vec<Part>,
    /// On-disk length of the message file in bytes.
    pub size: u64,
}

impl StructuredMessage {
    pub fn subject(&self) -> Option<&str> {
        self.headers.get("subject")
    }

    pub fn message_id(&self) -> Option<&str> {
        self.headers.get("message-id")
    }

    pub fn from(&self) -> Option<&str> {
        self.headers.get("from")
    }

    pub fn is_multipart(&self) -> bool {
        self.multipart
    }

    /// Depth-first, document-order traversal of every part below the root.
    pub fn walk(&self) -> PartWalker<'_> {
        PartWalker::new(&self.parts)
    }
}

/// One node of a message's content tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    /// `type/subtype`, lower-cased (e.g. `"application/pdf"`).
    pub content_type: String,
    /// Lower-cased Content-Disposition type (`"attachment"`, `"inline"`), if present.
    pub disposition: Option<String>,
    /// Filename from Content-Disposition or the Content-Type `name` parameter.
    pub filename: Option<String>,
    /// Transfer-decoded body. `None` for container parts.
    pub payload: Option<Vec<u8>>,
    /// Nested parts of a multipart container.
    pub children: Vec<Part>,
}

impl Part {
    pub fn is_attachment(&self) -> bool {
        self.disposition.as_deref() == Some("attachment")
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type.starts_with("multipart/")
    }
}

/// Iterator returned by [`StructuredMessage::walk`].
pub struct PartWalker<'a> {
    stack: Vec<&'a Part>,
}

impl<'a> PartWalker<'a> {
    fn new(parts: &'a [Part]) -> Self {
        Self {
            stack: parts.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PartWalker<'a> {
    type Item = &'a Part;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.stack.pop()?;
        self.stack.extend(part.children.iter().rev());
        Some(part)
    }
}
