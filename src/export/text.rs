//! Render metrics as indented key/value text.

use std::fmt::Write;

use crate::model::metrics::{MetricsCollection, MetricsRecord};

const INDENT: &str = "    ";

/// Render every item as a labelled block of `Key: value` lines.
pub fn render_text(collection: &MetricsCollection) -> String {
    let mut out = String::new();
    for (i, (label, record)) in collection.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(label);
        out.push_str(":\n");
        write_record(&mut out, record);
    }
    out
}

fn write_record(out: &mut String, record: &MetricsRecord) {
    let or_none = |v: &Option<String>| v.clone().unwrap_or_else(|| "(none)".to_string());

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{INDENT}Subject: {}", or_none(&record.subject));
    let _ = writeln!(out, "{INDENT}Message ID: {}", or_none(&record.message_id));
    let _ = writeln!(out, "{INDENT}From Address: {}", or_none(&record.from_address));
    let _ = writeln!(
        out,
        "{INDENT}Total Message Size: {} ({})",
        record.total_size,
        humansize::format_size(record.total_size, humansize::BINARY)
    );
    let _ = writeln!(out, "{INDENT}Has Attachments: {}", record.has_attachments);

    if let Some(name) = &record.attachment_file_name {
        let _ = writeln!(out, "{INDENT}Attachment File Name: {name}");
    }
    if let Some(category) = record.attachment_file_type {
        let _ = writeln!(out, "{INDENT}Attachment File Type: {category}");
    }

    if !record.attachments.is_empty() {
        let _ = writeln!(out, "{INDENT}Attachments:");
        for finding in &record.attachments {
            let name = finding.file_name().unwrap_or("");
            let kind = finding
                .file_category()
                .map(|c| c.description())
                .unwrap_or_default();
            let _ = writeln!(out, "{INDENT}{INDENT}- {name}: {kind}");
        }
    }
}
