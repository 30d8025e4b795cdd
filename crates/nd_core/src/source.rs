use async_trait::async_trait;
use crate::types::{NewsQuery, RawArticle};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Name of the news provider
    fn name(&self) -> &str;

    /// Fetch at most `query.count()` articles, in provider order.
    ///
    /// Network, authentication and provider errors are reported as
    /// `Error::SourceUnavailable`.
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawArticle>>;
}
