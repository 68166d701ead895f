//! Render metrics as CSV, one row per item.

use crate::model::metrics::{MetricsCollection, MetricsRecord};

const COLUMNS: [&str; 8] = [
    "Item",
    "Subject",
    "Message ID",
    "From Address",
    "Total Message Size",
    "Has Attachments",
    "Attachment File Name",
    "Attachment File Type",
];

/// Render `collection` as CSV with a header row.
///
/// Missing values become empty fields.
pub fn render_csv(collection: &MetricsCollection, separator: char) -> String {
    let sep = separator.to_string();
    let mut out = String::new();

    out.push_str(&COLUMNS.join(sep.as_str()));
    out.push('\n');

    for (label, record) in collection.iter() {
        out.push_str(&row(label, record, separator).join(sep.as_str()));
        out.push('\n');
    }
    out
}

fn row(label: &str, record: &MetricsRecord, separator: char) -> Vec<String> {
    let opt = |v: &Option<String>| csv_escape(v.as_deref().unwrap_or(""), separator);
    vec![
        csv_escape(label, separator),
        opt(&record.subject),
        opt(&record.message_id),
        opt(&record.from_address),
        record.total_size.to_string(),
        record.has_attachments.to_string(),
        opt(&record.attachment_file_name),
        csv_escape(
            &record
                .attachment_file_type
                .map(|c| c.description())
                .unwrap_or_default(),
            separator,
        ),
    ]
}

/// Escape a value for CSV (RFC 4180).
///
/// Wraps in double quotes if the value contains the separator, quotes, or newlines.
fn csv_escape(value: &str, separator: char) -> String {
    if value.contains(separator) || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
