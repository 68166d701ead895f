//! RFC 5322 top-level header block: locating it and unfolding its fields.

use crate::model::message::HeaderMap;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Strip a leading UTF-8 byte-order mark.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// Find the byte offset where headers end (position of the first blank line).
pub fn find_header_end(data: &[u8]) -> Option<usize> {
    for i in 0..data.len().saturating_sub(1) {
        if data[i] == b'\n' && data[i + 1] == b'\n' {
            return Some(i);
        }
        if i + 3 < data.len()
            && data[i] == b'\r'
            && data[i + 1] == b'\n'
            && data[i + 2] == b'\r'
            && data[i + 3] == b'\n'
        {
            return Some(i);
        }
    }
    None
}

/// Parse the header block at the top of `text` into a [`HeaderMap`].
///
/// Values are kept raw (encoded-words are not decoded, angle brackets are kept)
/// but continuation lines are unfolded and surrounding whitespace trimmed.
pub fn parse_header_block(text: &str) -> HeaderMap {
    let end = find_header_end(text.as_bytes()).unwrap_or(text.len());
    unfold_headers(&text[..end])
}

/// Join continuation lines (starting with space or tab) with the previous field.
fn unfold_headers(block: &str) -> HeaderMap {
    let mut fields: Vec<(String, String)> = Vec::new();

    for line in block.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = fields.last_mut() {
                let cont = line.trim();
                if !cont.is_empty() {
                    if !last.1.is_empty() {
                        last.1.push(' ');
                    }
                    last.1.push_str(cont);
                }
            }
        } else if let Some(colon_pos) = line.find(':') {
            let name = line[..colon_pos].trim().to_string();
            let value = line[colon_pos + 1..].trim().to_string();
            fields.push((name, value));
        }
        // Lines without a colon and not a continuation are silently skipped
    }

    let mut headers = HeaderMap::new();
    for (name, value) in fields {
        headers.insert(name, value);
    }
    headers
}
