pub mod content;
pub mod newsapi;

pub use newsapi::{NewsApiSource, SourceConfig};

pub mod prelude {
    pub use super::newsapi::{NewsApiSource, SourceConfig};
    pub use nd_core::{ArticleSource, NewsQuery, RawArticle, Result, Error};
}
