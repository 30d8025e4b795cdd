use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::Result;

/// Unmapped output of a sentiment model: whatever label set the model uses,
/// plus its confidence in that label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSentiment {
    pub label: String,
    pub score: f32,
}

impl RawSentiment {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self { label: label.into(), score }
    }
}

#[async_trait]
pub trait SummarizationModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Produce a summary of `text` of at most roughly `max_words` words.
    async fn summarize(&self, text: &str, max_words: usize) -> Result<String>;
}

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify `text`, returning the model's own label and score.
    async fn classify(&self, text: &str) -> Result<RawSentiment>;
}
