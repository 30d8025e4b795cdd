use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use nd_core::{ArticleSource, Error, NewsQuery, RawArticle, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::content;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const API_KEY_VAR: &str = "NEWS_API_KEY";
pub const BASE_URL_VAR: &str = "NEWS_API_URL";

#[derive(Clone)]
pub struct SourceConfig {
    pub api_key: String,
    pub base_url: String,
    /// Download each article page and use its paragraphs as the body.
    pub fetch_body: bool,
    pub body_timeout: Duration,
    /// Upper bound for the headline listing request.
    pub request_timeout: Duration,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("fetch_body", &self.fetch_body)
            .field("body_timeout", &self.body_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl SourceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch_body: true,
            body_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from a variable lookup, failing when the key is absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration(format!("{} is required", API_KEY_VAR)))?;

        let mut config = Self::new(api_key.trim());
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    pub fn with_fetch_body(mut self, fetch_body: bool) -> Self {
        self.fetch_body = fetch_body;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopHeadlinesResponse {
    status: String,
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    source: Option<ApiSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSource {
    name: Option<String>,
}

impl From<ApiArticle> for RawArticle {
    fn from(article: ApiArticle) -> Self {
        let content = article
            .content
            .as_deref()
            .map(content::strip_truncation_marker)
            .unwrap_or_default()
            .to_string();

        RawArticle {
            title: article.title.unwrap_or_default(),
            description: article.description.unwrap_or_default(),
            content,
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            published_at: article.published_at.unwrap_or_default(),
            url: article.url.unwrap_or_default(),
        }
    }
}

/// Turn a `top-headlines` answer into at most `count` articles in provider order,
/// or the provider's complaint into an error.
pub(crate) fn parse_top_headlines(status: StatusCode, body: &str, count: usize) -> Result<Vec<RawArticle>> {
    let parsed: std::result::Result<TopHeadlinesResponse, _> = serde_json::from_str(body);

    match parsed {
        Ok(response) if status.is_success() && response.status == "ok" => Ok(response
            .articles
            .into_iter()
            .take(count)
            .map(RawArticle::from)
            .collect()),
        Ok(response) => Err(Error::SourceUnavailable(format!(
            "provider answered {} ({}): {}",
            status,
            response.code.unwrap_or_else(|| response.status.clone()),
            response.message.unwrap_or_else(|| "no message".to_string())
        ))),
        Err(e) if status.is_success() => Err(Error::SourceUnavailable(format!(
            "malformed provider response: {}",
            e
        ))),
        Err(_) => Err(Error::SourceUnavailable(format!("provider answered {}", status))),
    }
}

/// The page text wins when there is any; otherwise the provider's content stays.
pub(crate) fn merge_body(provider_content: String, page: Result<String>) -> String {
    match page {
        Ok(body) if !body.trim().is_empty() => body,
        _ => provider_content,
    }
}

pub struct NewsApiSource {
    client: Client,
    config: SourceConfig,
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl NewsApiSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Configuration(format!("{} is required", API_KEY_VAR)));
        }
        content::parse_url(&config.base_url)
            .map_err(|e| Error::Configuration(format!("Invalid provider URL: {}", e)))?;

        let client = Client::builder()
            .user_agent(concat!("nd/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/top-headlines", self.config.base_url)
    }

    async fn enrich(&self, article: &mut RawArticle) {
        if article.url.is_empty() {
            return;
        }
        let page = content::fetch_body(&self.client, &article.url, self.config.body_timeout).await;
        match &page {
            Ok(body) if !body.trim().is_empty() => {
                debug!("📄 Extracted {} characters from {}", body.chars().count(), article.url)
            }
            Ok(_) => debug!("📄 No paragraphs found at {}", article.url),
            Err(e) => warn!("⚠️ Could not fetch article body from {}: {}", article.url, e),
        }
        article.content = merge_body(std::mem::take(&mut article.content), page);
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawArticle>> {
        info!(
            "📡 Fetching {} {} articles from {}",
            query.count(),
            query.category,
            query.country.as_str().to_uppercase()
        );

        let page_size = query.count().to_string();
        let response = self
            .client
            .get(self.endpoint())
            .header("X-Api-Key", &self.config.api_key)
            .query(&[
                ("category", query.category.as_str()),
                ("country", query.country.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("request to {} failed: {}", self.name(), e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("failed to read {} response: {}", self.name(), e)))?;

        let mut articles = parse_top_headlines(status, &body, query.count())?;
        info!("🗞️ {} returned {} articles", self.name(), articles.len());

        if self.config.fetch_body {
            for article in articles.iter_mut() {
                self.enrich(article).await;
            }
        }

        Ok(articles)
    }
}
