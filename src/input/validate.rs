//! Input path classification.

use std::path::Path;

use tracing::{error, info};

use crate::error::{AnalyzerError, Result};
use crate::model::target::InputTarget;

/// File name suffix recognized as a message file.
pub const EML_EXTENSION: &str = ".eml";

/// `true` if `name` looks like a message file. Case-sensitive.
///
/// Shared by the validator and the directory loader so both agree on what
/// counts as a message.
pub fn is_eml_name(name: &str) -> bool {
    name.ends_with(EML_EXTENSION)
}

/// `true` if `path` is a regular file with a message file name.
///
/// This is the per-entry test for directory scans. A directory named
/// `old.eml` does not count.
pub fn is_eml_entry(path: &Path) -> bool {
    path.is_file() && path.file_name().and_then(|n| n.to_str()).is_some_and(is_eml_name)
}

/// Classify `path` as a single message file or a message directory.
///
/// Every outcome is logged here exactly once; callers only need to propagate
/// the error.
pub fn classify(path: impl AsRef<Path>) -> Result<InputTarget> {
    let path = path.as_ref();
    let result = classify_path(path);
    match &result {
        Ok(InputTarget::SingleFile(_)) => {
            info!(path = %path.display(), "Valid email file path");
        }
        Ok(InputTarget::Directory(_)) => {
            info!(path = %path.display(), "Valid path: directory containing EML files");
        }
        Err(e) => {
            error!(path = %path.display(), "{e}");
        }
    }
    result
}

fn classify_path(path: &Path) -> Result<InputTarget> {
    let Some(path_str) = path.to_str() else {
        return Err(AnalyzerError::InvalidPath(
            path.to_string_lossy().into_owned(),
        ));
    };
    if path_str.is_empty() {
        return Err(AnalyzerError::InvalidPath(String::new()));
    }

    let meta = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AnalyzerError::PathNotFound(path.to_path_buf())
        } else {
            AnalyzerError::io(path, e)
        }
    })?;

    if meta.is_file() {
        let has_eml_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_eml_name);
        if has_eml_name {
            Ok(InputTarget::SingleFile(path.to_path_buf()))
        } else {
            Err(AnalyzerError::NotEmailFile(path.to_path_buf()))
        }
    } else if meta.is_dir() {
        if directory_has_eml(path)? {
            Ok(InputTarget::Directory(path.to_path_buf()))
        } else {
            Err(AnalyzerError::NoEmailFilesInDirectory(path.to_path_buf()))
        }
    } else {
        Err(AnalyzerError::InvalidPath(path_str.to_string()))
    }
}

/// Non-recursive check for at least one `.eml` file.
fn directory_has_eml(dir: &Path) -> Result<bool> {
    let entries = std::fs::read_dir(dir).map_err(|e| AnalyzerError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| AnalyzerError::io(dir, e))?;
        if is_eml_entry(&entry.path()) {
            return Ok(true);
        }
    }
    Ok(false)
}
