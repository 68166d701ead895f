//! The analysis pipeline: validate → load → parse → inspect → aggregate.

pub mod attachment;
pub mod classify;
pub mod metrics;

use std::path::Path;

use crate::config::AnalysisConfig;
use crate::error::{AnalyzerError, Result};
use crate::input::{loader, validate};
use crate::model::metrics::MetricsCollection;
use crate::parser::eml;

use self::attachment::AttachmentInspector;
use self::classify::{InferSniffer, MimeSniffer};
use self::metrics::AggregateOptions;

/// Runs the whole pipeline for one input path.
///
/// Holds only configuration and the sniffer; every call to [`analyze`]
/// starts from scratch and returns a new collection.
///
/// [`analyze`]: EmailAnalyzer::analyze
pub struct EmailAnalyzer {
    config: AnalysisConfig,
    sniffer: Box<dyn MimeSniffer + Send + Sync>,
}

impl EmailAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_sniffer(config, InferSniffer)
    }

    /// Use a custom MIME sniffer instead of the `infer`-based default.
    pub fn with_sniffer(
        config: AnalysisConfig,
        sniffer: impl MimeSniffer + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            sniffer: Box::new(sniffer),
        }
    }

    /// Analyze a single `.eml` file or a directory of them.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<MetricsCollection> {
        self.analyze_with_progress(path, None)
    }

    /// Like [`analyze`](Self::analyze), reporting `(done, total)` messages as it goes.
    pub fn analyze_with_progress(
        &self,
        path: impl AsRef<Path>,
        progress: Option<&dyn Fn(usize, usize)>,
    ) -> Result<MetricsCollection> {
        let path = path.as_ref();
        let target = validate::classify(path)?;
        let total_size = input_size(target.path())?;

        let encoding = loader::resolve_encoding(&self.config.encoding)?;
        let raw = loader::load(&target, self.config.directory_filter, encoding)?;
        let parsed = eml::parse(raw)?;

        let inspector = match self.config.temp_dir.as_deref() {
            Some(root) => AttachmentInspector::new(self.sniffer.as_ref()).with_temp_root(root),
            None => AttachmentInspector::new(self.sniffer.as_ref()),
        };
        let options = AggregateOptions {
            size_mode: self.config.size_mode,
            attachment_mode: self.config.attachment_mode,
        };

        let collection = metrics::aggregate(&parsed, total_size, &inspector, options, progress);
        tracing::info!(
            path = %path.display(),
            directory = target.is_directory(),
            messages = collection.len(),
            "Analysis complete"
        );
        Ok(collection)
    }
}

impl Default for EmailAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// File-system size of the input path, as reported by its metadata.
pub fn input_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| AnalyzerError::io(path, e))
}
