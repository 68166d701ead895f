//! Attachment findings and file categories.

use std::fmt;

use serde::Serialize;

/// Coarse category assigned to an attachment from its sniffed MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    DocumentReport,
    Invoice,
    Image,
    AudioFile,
    Spreadsheet,
    CompressedFile,
    CodeFile,
    Unknown,
}

impl FileCategory {
    /// Short label (e.g. `"invoice"`).
    pub fn label(self) -> &'static str {
        match self {
            Self::DocumentReport => "document report",
            Self::Invoice => "invoice",
            Self::Image => "image",
            Self::AudioFile => "audio file",
            Self::Spreadsheet => "spreadsheet",
            Self::CompressedFile => "compressed file",
            Self::CodeFile => "code file",
            Self::Unknown => "Un-Known",
        }
    }

    /// Sentence reported in the `Attachment File Type` field.
    pub fn description(self) -> String {
        match self {
            Self::Unknown => "The attachment file type is Un-Known".to_string(),
            Self::Invoice => "The attachment seems like an invoice".to_string(),
            Self::Image | Self::AudioFile => {
                format!("The attachment seems like an {}", self.label())
            }
            other => format!("The attachment seems like a {}", other.label()),
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl Serialize for FileCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.description())
    }
}

/// Result of inspecting one message (or one attachment part) for attachments.
///
/// `file_name` and `file_category` are set if and only if `has_attachment`;
/// the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentFinding {
    #[serde(rename = "Has Attachment")]
    has_attachment: bool,
    #[serde(rename = "Attachment File Name", skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(rename = "Attachment File Type", skip_serializing_if = "Option::is_none")]
    file_category: Option<FileCategory>,
}

impl AttachmentFinding {
    /// No attachment found.
    pub fn none() -> Self {
        Self {
            has_attachment: false,
            file_name: None,
            file_category: None,
        }
    }

    /// An attachment named `file_name` classified as `category`.
    pub fn found(file_name: impl Into<String>, category: FileCategory) -> Self {
        Self {
            has_attachment: true,
            file_name: Some(file_name.into()),
            file_category: Some(category),
        }
    }

    pub fn has_attachment(&self) -> bool {
        self.has_attachment
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn file_category(&self) -> Option<FileCategory> {
        self.file_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(
            FileCategory::Invoice.description(),
            "The attachment seems like an invoice"
        );
        assert_eq!(
            FileCategory::DocumentReport.description(),
            "The attachment seems like a document report"
        );
        assert_eq!(
            FileCategory::Image.description(),
            "The attachment seems like an image"
        );
        assert_eq!(
            FileCategory::AudioFile.description(),
            "The attachment seems like an audio file"
        );
        assert_eq!(
            FileCategory::CompressedFile.description(),
            "The attachment seems like a compressed file"
        );
        assert_eq!(
            FileCategory::Unknown.description(),
            "The attachment file type is Un-Known"
        );
    }

    #[test]
    fn test_finding_invariant() {
        let none = AttachmentFinding::none();
        assert!(!none.has_attachment());
        assert!(none.file_name().is_none() && none.file_category().is_none());

        let found = AttachmentFinding::found("a.zip", FileCategory::CompressedFile);
        assert!(found.has_attachment());
        assert_eq!(found.file_name(), Some("a.zip"));
        assert_eq!(found.file_category(), Some(FileCategory::CompressedFile));
    }

    #[test]
    fn test_finding_serializes_without_empty_keys() {
        let json = serde_json::to_value(AttachmentFinding::none()).unwrap();
        assert_eq!(json, serde_json::json!({ "Has Attachment": false }));

        let json =
            serde_json::to_value(AttachmentFinding::found("r.pdf", FileCategory::Invoice)).unwrap();
        assert_eq!(json["Attachment File Type"], "The attachment seems like an invoice");
    }
}
