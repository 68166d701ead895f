//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$EMLMETRICS_CONFIG` (environment variable)
//! 2. `~/.config/emlmetrics/config.toml` (Linux/macOS)
//!    `%APPDATA%\emlmetrics\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Pipeline behavior.
    pub analysis: AnalysisConfig,
    /// Output rendering.
    pub output: OutputConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override the directory holding `emlmetrics.log`.
    pub log_dir: Option<PathBuf>,
}

/// Pipeline behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How `Total Message Size` is computed.
    pub size_mode: SizeMode,
    /// Which directory entries are loaded.
    pub directory_filter: DirectoryFilter,
    /// How many attachments are classified per message.
    pub attachment_mode: AttachmentMode,
    /// Text encoding label used to decode message files (WHATWG label).
    pub encoding: String,
    /// Parent directory for per-attachment scratch directories.
    pub temp_dir: Option<PathBuf>,
}

/// Output rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,
    /// CSV field separator character.
    pub csv_separator: char,
}

/// Source of the `Total Message Size` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SizeMode {
    /// File-system size of the input path, shared by every record of a run.
    #[default]
    Input,
    /// Byte length of each individual message.
    PerMessage,
}

/// Directory entry selection for batch input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryFilter {
    /// Only regular files whose name ends with `.eml`.
    #[default]
    EmlOnly,
    /// Every entry, regardless of extension.
    AllEntries,
}

/// Number of attachments reported per message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentMode {
    /// Stop at the first attachment part.
    #[default]
    First,
    /// Classify every attachment part.
    All,
}

/// Rendering of the metrics collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_dir: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            size_mode: SizeMode::Input,
            directory_filter: DirectoryFilter::EmlOnly,
            attachment_mode: AttachmentMode::First,
            encoding: "utf-8".to_string(),
            temp_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            csv_separator: ',',
        }
    }
}

// ── Load ────────────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("EMLMETRICS_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("emlmetrics").join("config.toml"))
}

/// Return the directory that holds the log file.
pub fn log_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.log_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emlmetrics")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    log_dir(config).join("emlmetrics.log")
}
