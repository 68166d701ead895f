//! Log file sink for the CLI's tracing setup.

use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::config::{log_file_path, Config};

/// Open the non-rotating log file named by [`log_file_path`].
///
/// Returns `None` when the directory cannot be created or the file cannot be
/// opened, so the caller can log to stderr only.
pub fn file_appender(config: &Config) -> Option<RollingFileAppender> {
    let path = log_file_path(config);
    let dir = path.parent()?;
    let name = path.file_name()?.to_str()?;

    std::fs::create_dir_all(dir).ok()?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .ok()
}
