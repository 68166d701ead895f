//! Message parsing: header block decoding, MIME tree construction, and shape dispatch.

pub mod eml;
pub mod header;
pub mod mime;
