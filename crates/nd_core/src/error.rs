use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid credential/configuration. The pipeline never starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The news provider could not be reached or answered with an error.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Summarization degraded: {0}")]
    SummarizationDegraded(String),

    #[error("Classification degraded: {0}")]
    ClassificationDegraded(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
