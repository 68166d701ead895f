//! Per-message metrics records and the labelled collection returned to callers.

use indexmap::IndexMap;
use serde::Serialize;

use super::attachment::{AttachmentFinding, FileCategory};

/// Metrics for one message.
///
/// Serializes with the display field names (`"Subject"`, `"Message ID"`, ...).
/// The attachment name/type keys are emitted only when `has_attachments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsRecord {
    #[serde(rename = "Subject")]
    pub subject: Option<String>,

    #[serde(rename = "Message ID")]
    pub message_id: Option<String>,

    #[serde(rename = "From Address")]
    pub from_address: Option<String>,

    #[serde(rename = "Total Message Size")]
    pub total_size: u64,

    #[serde(rename = "Has Attachments")]
    pub has_attachments: bool,

    #[serde(rename = "Attachment File Name", skip_serializing_if = "Option::is_none")]
    pub attachment_file_name: Option<String>,

    #[serde(rename = "Attachment File Type", skip_serializing_if = "Option::is_none")]
    pub attachment_file_type: Option<FileCategory>,

    /// Every attachment, in document order. Filled only in all-attachments mode.
    #[serde(rename = "Attachments", skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentFinding>,
}

impl MetricsRecord {
    /// Build a record from header values, a size and the message's primary finding.
    pub fn new(
        subject: Option<&str>,
        message_id: Option<&str>,
        from_address: Option<&str>,
        total_size: u64,
        finding: &AttachmentFinding,
    ) -> Self {
        let has_attachments = finding.has_attachment();
        Self {
            subject: subject.map(String::from),
            message_id: message_id.map(String::from),
            from_address: from_address.map(String::from),
            total_size,
            has_attachments,
            attachment_file_name: finding.file_name().map(String::from),
            attachment_file_type: finding.file_category(),
            attachments: Vec::new(),
        }
    }
}

/// Ordered mapping `"Item-1"`, `"Item-2"`, ... → [`MetricsRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricsCollection {
    items: IndexMap<String, MetricsRecord>,
}

impl MetricsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for the 1-based position `n`.
    pub fn label(n: usize) -> String {
        format!("Item-{n}")
    }

    /// Append a record under the next positional label and return that label.
    pub fn push(&mut self, record: MetricsRecord) -> String {
        let label = Self::label(self.items.len() + 1);
        self.items.insert(label.clone(), record);
        label
    }

    pub fn get(&self, label: &str) -> Option<&MetricsRecord> {
        self.items.get(label)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricsRecord)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }
}
