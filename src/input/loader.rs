//! Reads raw message text for a classified input target.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::debug;

use crate::config::DirectoryFilter;
use crate::error::{AnalyzerError, Result};
use crate::input::validate::is_eml_entry;
use crate::model::message::RawMessage;
use crate::model::target::{InputTarget, MessageSet};

/// Resolve a WHATWG encoding label such as `"utf-8"` or `"latin1"`.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| AnalyzerError::UnsupportedEncoding(label.to_string()))
}

/// Load every message named by `target`.
///
/// A single file yields `MessageSet::Single`; a directory yields a batch in
/// file-name order. Any read or decode failure aborts the whole load.
pub fn load(
    target: &InputTarget,
    filter: DirectoryFilter,
    encoding: &'static Encoding,
) -> Result<MessageSet<RawMessage>> {
    match target {
        InputTarget::SingleFile(path) => read_message(path, encoding).map(MessageSet::Single),
        InputTarget::Directory(dir) => {
            let paths = directory_entries(dir, filter)?;
            if paths.is_empty() {
                return Err(AnalyzerError::NoEmailFilesInDirectory(dir.clone()));
            }
            debug!(dir = %dir.display(), count = paths.len(), "Loading directory");
            paths
                .iter()
                .map(|p| read_message(p, encoding))
                .collect::<Result<Vec<_>>>()
                .map(MessageSet::Batch)
        }
    }
}

/// List the entries of `dir` that the loader will read, sorted by file name.
pub fn directory_entries(dir: &Path, filter: DirectoryFilter) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| AnalyzerError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AnalyzerError::io(dir, e))?;
        let path = entry.path();
        let keep = match filter {
            DirectoryFilter::AllEntries => true,
            DirectoryFilter::EmlOnly => is_eml_entry(&path),
        };
        if keep {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Read one message file and decode it as text in `encoding`.
pub fn read_message(path: &Path, encoding: &'static Encoding) -> Result<RawMessage> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AnalyzerError::PathNotFound(path.to_path_buf())
        } else {
            AnalyzerError::io(path, e)
        }
    })?;

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .ok_or_else(|| AnalyzerError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name().to_string(),
        })?
        .into_owned();

    Ok(RawMessage {
        source: path.to_path_buf(),
        text,
        size: bytes.len() as u64,
    })
}
