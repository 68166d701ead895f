//! Metrics aggregation: one record per parsed message, labelled by position.

use crate::analysis::attachment::AttachmentInspector;
use crate::config::{AttachmentMode, SizeMode};
use crate::model::attachment::AttachmentFinding;
use crate::model::message::StructuredMessage;
use crate::model::metrics::{MetricsCollection, MetricsRecord};
use crate::model::target::MessageSet;

/// Knobs that change what goes into a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    pub size_mode: SizeMode,
    pub attachment_mode: AttachmentMode,
}

/// Build a fresh [`MetricsCollection`] for `messages`.
///
/// `total_size` is the size of the input path; it is used for every record
/// when `size_mode` is [`SizeMode::Input`]. Labels follow the order of
/// `messages`, starting at `Item-1`.
pub fn aggregate(
    messages: &MessageSet<StructuredMessage>,
    total_size: u64,
    inspector: &AttachmentInspector<'_>,
    options: AggregateOptions,
    progress: Option<&dyn Fn(usize, usize)>,
) -> MetricsCollection {
    let total = messages.len();
    let mut collection = MetricsCollection::new();

    for (i, msg) in messages.iter().enumerate() {
        if let Some(cb) = progress {
            cb(i, total);
        }
        let record = build_record(msg, total_size, inspector, options);
        let label = collection.push(record);
        tracing::debug!(%label, source = %msg.source.display(), "Aggregated message");
    }

    if let Some(cb) = progress {
        cb(total, total);
    }
    collection
}

/// Build the record for a single message.
pub fn build_record(
    msg: &StructuredMessage,
    total_size: u64,
    inspector: &AttachmentInspector<'_>,
    options: AggregateOptions,
) -> MetricsRecord {
    let size = match options.size_mode {
        SizeMode::Input => total_size,
        SizeMode::PerMessage => msg.size,
    };

    match options.attachment_mode {
        AttachmentMode::First => {
            let finding = inspector.inspect(msg);
            record_for(msg, size, &finding)
        }
        AttachmentMode::All => {
            let findings = inspector.inspect_all(msg);
            let first = findings
                .first()
                .cloned()
                .unwrap_or_else(AttachmentFinding::none);
            let mut record = record_for(msg, size, &first);
            record.attachments = findings;
            record
        }
    }
}

fn record_for(msg: &StructuredMessage, size: u64, finding: &AttachmentFinding) -> MetricsRecord {
    MetricsRecord::new(msg.subject(), msg.message_id(), msg.from(), size, finding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use crate::analysis::classify::MimeSniffer;
    use crate::model::attachment::FileCategory;
    use crate::model::message::{HeaderMap, Part};

    struct Fixed(&'static str);

    impl MimeSniffer for Fixed {
        fn sniff(&self, _path: &Path) -> std::io::Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn message(subject: &str, size: u64, attachments: &[&str]) -> StructuredMessage {
        let mut headers = HeaderMap::new();
        headers.insert("Subject", subject);
        headers.insert("Message-ID", format!("<{subject}@x>"));
        headers.insert("From", "a@b.com");
        let parts: Vec<Part> = attachments
            .iter()
            .map(|name| Part {
                content_type: "application/zip".into(),
                disposition: Some("attachment".into()),
                filename: Some(name.to_string()),
                payload: Some(b"PK\x03\x04".to_vec()),
                children: Vec::new(),
            })
            .collect();
        StructuredMessage {
            source: PathBuf::from(format!("{subject}.eml")),
            headers,
            multipart: !parts.is_empty(),
            parts,
            size,
        }
    }

    #[test]
    fn test_single_message_is_item_1() {
        let sniffer = Fixed("application/zip");
        let inspector = AttachmentInspector::new(&sniffer);
        let set = MessageSet::Single(message("Hello", 120, &[]));

        let coll = aggregate(&set, 120, &inspector, AggregateOptions::default(), None);
        assert_eq!(coll.len(), 1);
        let rec = coll.get("Item-1").unwrap();
        assert_eq!(rec.subject.as_deref(), Some("Hello"));
        assert_eq!(rec.message_id.as_deref(), Some("<Hello@x>"));
        assert_eq!(rec.from_address.as_deref(), Some("a@b.com"));
        assert_eq!(rec.total_size, 120);
        assert!(!rec.has_attachments);
        assert!(rec.attachment_file_name.is_none());
        assert!(rec.attachment_file_type.is_none());
    }

    #[test]
    fn test_batch_labels_follow_order() {
        let sniffer = Fixed("application/zip");
        let inspector = AttachmentInspector::new(&sniffer);
        let set = MessageSet::Batch(vec![
            message("first", 10, &[]),
            message("second", 20, &["bundle.zip"]),
            message("third", 30, &[]),
        ]);

        let coll = aggregate(&set, 4096, &inspector, AggregateOptions::default(), None);
        let labels: Vec<&str> = coll.labels().collect();
        assert_eq!(labels, vec!["Item-1", "Item-2", "Item-3"]);

        let second = coll.get("Item-2").unwrap();
        assert!(second.has_attachments);
        assert_eq!(second.attachment_file_name.as_deref(), Some("bundle.zip"));
        assert_eq!(
            second.attachment_file_type,
            Some(FileCategory::CompressedFile)
        );
        // Input size mode shares one size across the batch
        assert!(coll.iter().all(|(_, r)| r.total_size == 4096));
    }

    #[test]
    fn test_per_message_size_mode() {
        let sniffer = Fixed("application/zip");
        let inspector = AttachmentInspector::new(&sniffer);
        let set = MessageSet::Batch(vec![message("a", 10, &[]), message("b", 20, &[])]);
        let options = AggregateOptions {
            size_mode: SizeMode::PerMessage,
            ..Default::default()
        };

        let coll = aggregate(&set, 4096, &inspector, options, None);
        let sizes: Vec<u64> = coll.iter().map(|(_, r)| r.total_size).collect();
        assert_eq!(sizes, vec![10, 20]);
    }

    #[test]
    fn test_all_attachment_mode_keeps_first_in_scalar_fields() {
        let sniffer = Fixed("application/zip");
        let inspector = AttachmentInspector::new(&sniffer);
        let set = MessageSet::Single(message("multi", 1, &["one.zip", "two.zip"]));
        let options = AggregateOptions {
            attachment_mode: AttachmentMode::All,
            ..Default::default()
        };

        let coll = aggregate(&set, 1, &inspector, options, None);
        let rec = coll.get("Item-1").unwrap();
        assert_eq!(rec.attachment_file_name.as_deref(), Some("one.zip"));
        assert_eq!(rec.attachments.len(), 2);
        assert_eq!(rec.attachments[1].file_name(), Some("two.zip"));
    }

    #[test]
    fn test_repeated_calls_do_not_accumulate() {
        let sniffer = Fixed("application/zip");
        let inspector = AttachmentInspector::new(&sniffer);
        let set = MessageSet::Batch(vec![message("a", 1, &["x.zip"]), message("b", 2, &[])]);

        let first = aggregate(&set, 3, &inspector, AggregateOptions::default(), None);
        let second = aggregate(&set, 3, &inspector, AggregateOptions::default(), None);
        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_progress_reports_each_step() {
        let sniffer = Fixed("application/zip");
        let inspector = AttachmentInspector::new(&sniffer);
        let set = MessageSet::Batch(vec![message("a", 1, &[]), message("b", 2, &[])]);
        let calls = RefCell::new(Vec::new());

        aggregate(
            &set,
            3,
            &inspector,
            AggregateOptions::default(),
            Some(&|cur, total| calls.borrow_mut().push((cur, total))),
        );
        assert_eq!(calls.into_inner(), vec![(0, 2), (1, 2), (2, 2)]);
    }
}
