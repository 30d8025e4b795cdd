use std::sync::Arc;
use nd_core::{Error, Result, SummarizationModel, SUMMARY_UNAVAILABLE};
use tracing::{debug, warn};

use crate::text;

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Texts shorter than this (in characters) are returned unchanged.
    pub min_length: usize,
    /// Input is cut to this many characters before it reaches the model.
    pub max_input_chars: usize,
    pub chunk_words: usize,
    /// Word budget for the whole summary, shared between chunks.
    pub max_summary_words: usize,
    pub max_summary_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            min_length: 40,
            max_input_chars: 4000,
            chunk_words: 300,
            max_summary_words: 150,
            max_summary_chars: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summarizer {
    model: Arc<dyn SummarizationModel>,
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(model: Arc<dyn SummarizationModel>, config: SummarizerConfig) -> Self {
        Self { model, config }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Summarize `text`, substituting the fallback marker when the model fails.
    pub async fn summarize(&self, text: &str) -> String {
        match self.try_summarize(text).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("⚠️ {}", e);
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }

    /// Summarize `text`. The result is never longer than `text`.
    pub async fn try_summarize(&self, text: &str) -> Result<String> {
        let length = text.chars().count();
        if length < self.config.min_length {
            debug!("✂️ Text of {} characters is too short to summarize", length);
            return Ok(text.to_string());
        }

        let input = text::truncate_chars(text, self.config.max_input_chars);
        let chunks = text::chunk_words(input, self.config.chunk_words);
        if chunks.is_empty() {
            return Ok(text.trim().to_string());
        }

        let budget = (self.config.max_summary_words / chunks.len()).max(30);
        let mut summaries = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            debug!("🤖 Summarizing chunk {}/{} with {}", i + 1, chunks.len(), self.model.name());
            let summary = self.model.summarize(chunk, budget).await.map_err(|e| {
                Error::SummarizationDegraded(format!("{} failed: {}", self.model.name(), e))
            })?;
            let summary = summary.trim();
            if !summary.is_empty() {
                summaries.push(summary.to_string());
            }
        }

        if summaries.is_empty() {
            return Err(Error::SummarizationDegraded(format!(
                "{} returned an empty summary",
                self.model.name()
            )));
        }

        let summary = summaries.join(" ");
        let limit = length.min(self.config.max_summary_chars);
        Ok(text::truncate_at_word_boundary(&summary, limit).to_string())
    }
}
