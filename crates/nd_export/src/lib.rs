use std::path::PathBuf;
use chrono::NaiveDateTime;

pub mod csv_file;

pub use csv_file::CsvExporter;
pub use nd_core::ResultExporter;

/// `news_summaries_YYYYMMDD_HHMM.csv` in the working directory.
pub fn default_export_path(now: NaiveDateTime) -> PathBuf {
    PathBuf::from(now.format("news_summaries_%Y%m%d_%H%M.csv").to_string())
}

pub mod prelude {
    pub use super::{default_export_path, CsvExporter, ResultExporter};
}
