//! Attachment discovery and classification for parsed messages.
//!
//! Each attachment payload is written to its own scratch directory, sniffed,
//! and the directory is removed again before the inspector returns.

use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::analysis::classify::{classify_file, MimeSniffer};
use crate::error::{AnalyzerError, Result};
use crate::model::attachment::AttachmentFinding;
use crate::model::message::{Part, StructuredMessage};

/// Walks a message's parts and classifies the ones marked as attachments.
pub struct AttachmentInspector<'a> {
    sniffer: &'a dyn MimeSniffer,
    temp_root: Option<&'a Path>,
}

impl<'a> AttachmentInspector<'a> {
    pub fn new(sniffer: &'a dyn MimeSniffer) -> Self {
        Self {
            sniffer,
            temp_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_temp_root(mut self, root: &'a Path) -> Self {
        self.temp_root = Some(root);
        self
    }

    /// Report the first attachment of `msg`.
    ///
    /// Later attachment parts are not looked at. A failure while processing
    /// the attachment is logged and reported as "no attachment".
    pub fn inspect(&self, msg: &StructuredMessage) -> AttachmentFinding {
        if !msg.is_multipart() {
            return AttachmentFinding::none();
        }

        match msg.walk().find(|p| p.is_attachment()) {
            Some(part) => match self.classify_part(0, part) {
                Ok(finding) => finding,
                Err(e) => {
                    warn!(source = %msg.source.display(), error = %e, "Attachment processing failed");
                    AttachmentFinding::none()
                }
            },
            None => AttachmentFinding::none(),
        }
    }

    /// Report every attachment of `msg`, in document order.
    ///
    /// Stops at the first processing failure and returns what was gathered
    /// before it.
    pub fn inspect_all(&self, msg: &StructuredMessage) -> Vec<AttachmentFinding> {
        let mut findings = Vec::new();
        if !msg.is_multipart() {
            return findings;
        }

        for (idx, part) in msg.walk().filter(|p| p.is_attachment()).enumerate() {
            match self.classify_part(idx, part) {
                Ok(finding) => findings.push(finding),
                Err(e) => {
                    warn!(source = %msg.source.display(), error = %e, "Attachment processing failed");
                    break;
                }
            }
        }
        findings
    }

    fn classify_part(&self, idx: usize, part: &Part) -> Result<AttachmentFinding> {
        let name = part
            .filename
            .clone()
            .unwrap_or_else(|| format!("attachment_{idx}"));

        let payload = part
            .payload
            .as_deref()
            .ok_or_else(|| AnalyzerError::attachment(&name, "attachment has no payload"))?;

        // Removed on drop, whichever way this function exits.
        let scratch = self
            .scratch_dir()
            .map_err(|e| AnalyzerError::attachment(&name, e))?;
        let path = scratch.path().join(scratch_file_name(&name, 150));

        std::fs::write(&path, payload).map_err(|e| AnalyzerError::attachment(&name, e))?;
        let category =
            classify_file(&path, self.sniffer).map_err(|e| AnalyzerError::attachment(&name, e))?;

        debug!(file = %name, size = payload.len(), category = category.label(), "Found attachment");
        Ok(AttachmentFinding::found(name, category))
    }

    fn scratch_dir(&self) -> std::io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("emlmetrics-");
        match self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }
}

/// Turn an attachment name into a safe single path component.
fn scratch_file_name(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '.') {
        "attachment".to_string()
    } else {
        sanitized
    }
}
