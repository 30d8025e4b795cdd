use std::sync::Arc;
use nd_core::{Classification, Error, RawSentiment, Result, Sentiment, SentimentModel};
use tracing::{debug, warn};

use crate::text;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub chunk_words: usize,
    /// Positive/negative verdicts with a lower confidence count as neutral.
    pub neutral_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            chunk_words: 100,
            neutral_threshold: 0.6,
        }
    }
}

/// Map a model's raw output onto the three sentiment labels.
///
/// 1. The label is compared case-insensitively: `positive`, `pos` and `label_2`
///    are positive; `negative`, `neg` and `label_0` are negative; `neutral`,
///    `neu` and `label_1` are neutral. The `label_N` forms follow the usual
///    three-class ordering of hub sentiment checkpoints.
/// 2. A positive or negative label scored below `neutral_threshold` becomes
///    neutral.
/// 3. Any other label, or a score outside `[0, 1]` (NaN included), cannot be
///    mapped and yields `None`.
pub fn map_raw_sentiment(raw: &RawSentiment, neutral_threshold: f32) -> Option<Sentiment> {
    if !(0.0..=1.0).contains(&raw.score) {
        return None;
    }

    let label = match raw.label.trim().to_lowercase().as_str() {
        "positive" | "pos" | "label_2" => Sentiment::Positive,
        "negative" | "neg" | "label_0" => Sentiment::Negative,
        "neutral" | "neu" | "label_1" => Sentiment::Neutral,
        _ => return None,
    };

    if label != Sentiment::Neutral && raw.score < neutral_threshold {
        Some(Sentiment::Neutral)
    } else {
        Some(label)
    }
}

/// Combine per-chunk verdicts. A label wins only with a strict majority over
/// both others; otherwise the text is neutral with score 0.5.
pub fn aggregate(votes: &[(Sentiment, f32)]) -> Classification {
    let count = |label: Sentiment| votes.iter().filter(|(l, _)| *l == label).count();
    let mean = |label: Sentiment| {
        let scores: Vec<f32> = votes.iter().filter(|(l, _)| *l == label).map(|(_, s)| *s).collect();
        scores.iter().sum::<f32>() / scores.len().max(1) as f32
    };

    let positive = count(Sentiment::Positive);
    let negative = count(Sentiment::Negative);
    let neutral = count(Sentiment::Neutral);

    let winner = if positive > negative && positive > neutral {
        Some(Sentiment::Positive)
    } else if negative > positive && negative > neutral {
        Some(Sentiment::Negative)
    } else if neutral > positive && neutral > negative {
        Some(Sentiment::Neutral)
    } else {
        None
    };

    match winner {
        Some(label) => Classification { label, score: Some(mean(label)) },
        None => Classification { label: Sentiment::Neutral, score: Some(0.5) },
    }
}

#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    model: Arc<dyn SentimentModel>,
    config: ClassifierConfig,
}

impl SentimentClassifier {
    pub fn new(model: Arc<dyn SentimentModel>, config: ClassifierConfig) -> Self {
        Self { model, config }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn classify(&self, text: &str) -> Sentiment {
        self.analyze(text).await.label
    }

    /// Classify `text`, recording `Unknown` when the model fails.
    pub async fn analyze(&self, text: &str) -> Classification {
        match self.try_analyze(text).await {
            Ok(classification) => classification,
            Err(e) => {
                warn!("⚠️ {}", e);
                Classification::unknown()
            }
        }
    }

    pub async fn try_analyze(&self, text: &str) -> Result<Classification> {
        if text.trim().is_empty() {
            return Ok(Classification { label: Sentiment::Neutral, score: None });
        }

        let chunks = text::chunk_words(text, self.config.chunk_words);
        let mut votes = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            let raw = self.model.classify(chunk).await.map_err(|e| {
                Error::ClassificationDegraded(format!("{} failed: {}", self.model.name(), e))
            })?;
            debug!("🎭 {} said {} ({:.2})", self.model.name(), raw.label, raw.score);

            let label = map_raw_sentiment(&raw, self.config.neutral_threshold).ok_or_else(|| {
                Error::ClassificationDegraded(format!(
                    "{} returned unmappable output {:?} ({})",
                    self.model.name(),
                    raw.label,
                    raw.score
                ))
            })?;
            votes.push((label, raw.score));
        }

        Ok(aggregate(&votes))
    }
}
