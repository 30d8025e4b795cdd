use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Provider-imposed maximum page size.
pub const MAX_ARTICLES: usize = 10;
pub const DEFAULT_ARTICLES: usize = 5;

/// Summary placeholder used when the summarization model failed.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    #[default]
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Configuration(format!("Unknown category: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[default]
    Us,
    Gb,
    In,
    Au,
    Ca,
}

impl Country {
    pub const ALL: [Country; 5] = [Country::Us, Country::Gb, Country::In, Country::Au, Country::Ca];

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Us => "us",
            Country::Gb => "gb",
            Country::In => "in",
            Country::Au => "au",
            Country::Ca => "ca",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Country::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::Configuration(format!("Unknown country code: {}", s)))
    }
}

/// Validated fetch parameters. `count` is always within `1..=MAX_ARTICLES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsQuery {
    pub category: Category,
    pub country: Country,
    count: usize,
}

impl NewsQuery {
    pub fn new(category: Category, country: Country, count: usize) -> Self {
        Self {
            category,
            country,
            count: count.clamp(1, MAX_ARTICLES),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self::new(Category::default(), Country::default(), DEFAULT_ARTICLES)
    }
}

/// An article as returned by the provider. Any text field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub description: String,
    pub content: String,
    pub source: String,
    pub published_at: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Classification failed. Never produced by a successful classification.
    Unknown,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Unknown => "UNKNOWN",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "😟",
            Sentiment::Unknown => "❔",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "POSITIVE" => Ok(Sentiment::Positive),
            "NEUTRAL" => Ok(Sentiment::Neutral),
            "NEGATIVE" => Ok(Sentiment::Negative),
            "UNKNOWN" => Ok(Sentiment::Unknown),
            other => Err(Error::Inference(format!("Unknown sentiment label: {}", other))),
        }
    }
}

/// A sentiment label together with the confidence the model reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Sentiment,
    pub score: Option<f32>,
}

impl Classification {
    pub fn unknown() -> Self {
        Self { label: Sentiment::Unknown, score: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedArticle {
    pub title: String,
    /// Length in characters of the text that was summarized and classified.
    pub original_length: usize,
    pub summary: String,
    pub sentiment: Sentiment,
    pub score: Option<f32>,
    pub source: String,
    pub published_at: String,
    pub url: String,
}

impl ProcessedArticle {
    pub fn is_degraded(&self) -> bool {
        self.summary == SUMMARY_UNAVAILABLE || self.sentiment == Sentiment::Unknown
    }
}

/// Processed articles of one run, in provider order.
pub type RunResult = Vec<ProcessedArticle>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_clamps_count() {
        assert_eq!(NewsQuery::new(Category::Science, Country::Gb, 0).count(), 1);
        assert_eq!(NewsQuery::new(Category::Science, Country::Gb, 7).count(), 7);
        assert_eq!(NewsQuery::new(Category::Science, Country::Gb, 42).count(), MAX_ARTICLES);
    }

    #[test]
    fn test_default_query() {
        let query = NewsQuery::default();
        assert_eq!(query.category, Category::Technology);
        assert_eq!(query.country, Country::Us);
        assert_eq!(query.count(), DEFAULT_ARTICLES);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(" Health ".parse::<Category>().unwrap(), Category::Health);
        assert!("politics".parse::<Category>().is_err());
        assert_eq!("IN".parse::<Country>().unwrap(), Country::In);
        assert!("fr".parse::<Country>().is_err());
    }

    #[test]
    fn test_sentiment_labels() {
        for label in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative, Sentiment::Unknown] {
            assert_eq!(label.to_string().parse::<Sentiment>().unwrap(), label);
        }
        assert!("MIXED".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_degraded_record() {
        let mut article = ProcessedArticle {
            title: "Markets rally".to_string(),
            original_length: 13,
            summary: "Markets rally".to_string(),
            sentiment: Sentiment::Positive,
            score: Some(0.9),
            source: "Reuters".to_string(),
            published_at: "2024-05-01T10:00:00Z".to_string(),
            url: String::new(),
        };
        assert!(!article.is_degraded());

        article.sentiment = Sentiment::Unknown;
        assert!(article.is_degraded());

        article.sentiment = Sentiment::Neutral;
        article.summary = SUMMARY_UNAVAILABLE.to_string();
        assert!(article.is_degraded());
    }
}
