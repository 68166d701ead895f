//! Render metrics as pretty-printed JSON keyed by item label.

use crate::model::metrics::MetricsCollection;

pub fn render_json(collection: &MetricsCollection) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attachment::{AttachmentFinding, FileCategory};
    use crate::model::metrics::MetricsRecord;

    #[test]
    fn test_render_json_keeps_item_order() {
        let mut coll = MetricsCollection::new();
        for subject in ["b", "a", "c"] {
            coll.push(MetricsRecord::new(
                Some(subject),
                None,
                None,
                1,
                &AttachmentFinding::none(),
            ));
        }
        let json = render_json(&coll).unwrap();
        let i1 = json.find("\"Item-1\"").unwrap();
        let i2 = json.find("\"Item-2\"").unwrap();
        let i3 = json.find("\"Item-3\"").unwrap();
        assert!(i1 < i2 && i2 < i3);
    }

    #[test]
    fn test_render_json_attachment_fields() {
        let mut coll = MetricsCollection::new();
        coll.push(MetricsRecord::new(
            Some("zip"),
            Some("<z@x>"),
            Some("z@x"),
            42,
            &AttachmentFinding::found("bundle.zip", FileCategory::CompressedFile),
        ));
        let value: serde_json::Value = serde_json::from_str(&render_json(&coll).unwrap()).unwrap();
        assert_eq!(value["Item-1"]["Attachment File Name"], "bundle.zip");
        assert_eq!(
            value["Item-1"]["Attachment File Type"],
            "The attachment seems like a compressed file"
        );
    }
}
