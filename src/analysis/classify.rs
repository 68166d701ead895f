//! Attachment type classification: byte-signature sniffing and the category table.

use std::path::Path;

use crate::model::attachment::FileCategory;

/// Maps a file's contents to a MIME type string.
pub trait MimeSniffer {
    fn sniff(&self, path: &Path) -> std::io::Result<String>;
}

/// Default sniffer backed by the `infer` signature database.
///
/// Content without a known signature is reported the way `file --mime-type`
/// does: `application/x-empty` for empty files, `text/plain` for text, and
/// `application/octet-stream` for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferSniffer;

impl MimeSniffer for InferSniffer {
    fn sniff(&self, path: &Path) -> std::io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(sniff_bytes(&bytes).to_string())
    }
}

/// Sniff an in-memory buffer.
pub fn sniff_bytes(bytes: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type();
    }
    if bytes.is_empty() {
        "application/x-empty"
    } else if looks_like_text(bytes) {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// UTF-8 without stray control characters, or single-byte text such as
/// Latin-1: printable ASCII, whitespace and high bytes, no other C0 controls.
fn looks_like_text(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(text) => !text
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t' | '\x0c' | '\x1b')),
        Err(_) => bytes.iter().all(|&b| is_single_byte_text(b)),
    }
}

fn is_single_byte_text(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b | 0x20..=0x7e | 0x80..=0xff)
}

/// Ordered prefix table; the first matching prefix wins.
const CATEGORY_TABLE: &[(&str, FileCategory)] = &[
    ("text/", FileCategory::DocumentReport),
    ("application/pdf", FileCategory::Invoice),
    ("image/", FileCategory::Image),
    ("audio/", FileCategory::AudioFile),
    ("application/vnd.ms-excel", FileCategory::Spreadsheet),
    ("application/zip", FileCategory::CompressedFile),
    ("application/octet-stream", FileCategory::CodeFile),
];

/// Map a MIME type to its category.
pub fn classify_mime(mime: &str) -> FileCategory {
    CATEGORY_TABLE
        .iter()
        .find(|(prefix, _)| mime.starts_with(prefix))
        .map(|&(_, category)| category)
        .unwrap_or(FileCategory::Unknown)
}

/// Sniff the file at `path` and map the result to a category.
pub fn classify_file(path: &Path, sniffer: &dyn MimeSniffer) -> std::io::Result<FileCategory> {
    let mime = sniffer.sniff(path)?;
    let category = classify_mime(&mime);
    tracing::debug!(path = %path.display(), %mime, category = category.label(), "Classified attachment");
    Ok(category)
}
