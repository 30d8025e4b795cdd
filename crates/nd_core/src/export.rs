use std::path::Path;
use crate::types::ProcessedArticle;
use crate::Result;

pub trait ResultExporter {
    /// Write `results` to `destination`, replacing any existing file.
    ///
    /// Failures are reported as `Error::ExportFailed`.
    fn export(&self, results: &[ProcessedArticle], destination: &Path) -> Result<()>;
}
