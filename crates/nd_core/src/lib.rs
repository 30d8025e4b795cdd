pub mod error;
pub mod export;
pub mod models;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use export::ResultExporter;
pub use models::{RawSentiment, SentimentModel, SummarizationModel};
pub use source::ArticleSource;
pub use types::{
    Category, Classification, Country, NewsQuery, ProcessedArticle, RawArticle, RunResult,
    Sentiment, DEFAULT_ARTICLES, MAX_ARTICLES, SUMMARY_UNAVAILABLE,
};
