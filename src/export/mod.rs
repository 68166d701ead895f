//! Rendering of a metrics collection: indented text, JSON, and CSV.

pub mod csv;
pub mod json;
pub mod text;

use std::path::Path;

use crate::config::OutputFormat;
use crate::model::metrics::MetricsCollection;

/// Render `collection` in `format`.
pub fn render(
    collection: &MetricsCollection,
    format: OutputFormat,
    csv_separator: char,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_text(collection)),
        OutputFormat::Json => json::render_json(collection),
        OutputFormat::Csv => Ok(csv::render_csv(collection, csv_separator)),
    }
}

/// Render `collection` and write it to `output_path`.
pub fn export_to_file(
    collection: &MetricsCollection,
    format: OutputFormat,
    csv_separator: char,
    output_path: &Path,
) -> anyhow::Result<()> {
    let rendered = render(collection, format, csv_separator)?;
    std::fs::write(output_path, rendered)?;
    tracing::info!(path = %output_path.display(), ?format, "Wrote metrics");
    Ok(())
}
