use std::path::Path;
use nd_core::{Error, ProcessedArticle, Result, ResultExporter};
use tracing::info;

pub const HEADER: [&str; 3] = ["title", "summary", "sentiment"];

/// Comma-separated export, one row per article after a fixed header.
///
/// An existing file at the destination is replaced, never appended to.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    fn write(&self, results: &[ProcessedArticle], destination: &Path) -> std::result::Result<(), csv::Error> {
        // Writer::from_path truncates the destination
        let mut writer = csv::Writer::from_path(destination)?;
        writer.write_record(HEADER)?;
        for article in results {
            writer.write_record([
                article.title.as_str(),
                article.summary.as_str(),
                article.sentiment.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ResultExporter for CsvExporter {
    fn export(&self, results: &[ProcessedArticle], destination: &Path) -> Result<()> {
        self.write(results, destination)
            .map_err(|e| Error::ExportFailed(format!("{}: {}", destination.display(), e)))?;
        info!("💾 Saved {} summaries to {}", results.len(), destination.display());
        Ok(())
    }
}
