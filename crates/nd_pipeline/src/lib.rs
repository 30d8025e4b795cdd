pub mod processor;

pub use processor::{select_text, ArticleProcessor};

pub mod prelude {
    pub use super::processor::ArticleProcessor;
    pub use nd_core::{NewsQuery, ProcessedArticle, RawArticle, Result, RunResult};
}
