use nd_core::Result;

pub mod models;
pub mod sentiment;
pub mod summarizer;
pub mod text;

pub use models::{create_models, ModelKind, Models};
pub use sentiment::{map_raw_sentiment, ClassifierConfig, SentimentClassifier};
pub use summarizer::{Summarizer, SummarizerConfig};

#[derive(Clone, Default)]
pub struct Config {
    pub model: ModelKind,
    pub model_url: Option<String>,
    pub api_key: Option<String>,
    pub summarizer: SummarizerConfig,
    pub classifier: ClassifierConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("model_url", &self.model_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("summarizer", &self.summarizer)
            .field("classifier", &self.classifier)
            .finish()
    }
}

/// Build the summarizer and classifier wrappers around the configured backend.
pub fn create_inference(config: &Config) -> Result<(Summarizer, SentimentClassifier)> {
    let models = create_models(config)?;
    Ok((
        Summarizer::new(models.summarization, config.summarizer.clone()),
        SentimentClassifier::new(models.sentiment, config.classifier.clone()),
    ))
}

pub mod prelude {
    pub use super::{create_inference, Config, ModelKind, SentimentClassifier, Summarizer};
    pub use nd_core::{Classification, Error, Result, Sentiment};
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::Sentiment;

    #[tokio::test]
    async fn test_inference_pipeline() {
        let (summarizer, classifier) = create_inference(&Config::default()).unwrap();
        assert_eq!(summarizer.model_name(), "Heuristic");
        assert_eq!(classifier.model_name(), "Heuristic");

        let text = "Chipmakers rallied on Tuesday after strong results. Analysts expect more gains.";
        let summary = summarizer.summarize(text).await;
        assert!(!summary.is_empty());
        assert!(summary.chars().count() <= text.chars().count());
        assert_eq!(classifier.classify(text).await, Sentiment::Positive);
    }

    #[test]
    fn test_deepseek_needs_key() {
        let config = Config { model: ModelKind::DeepSeek, ..Default::default() };
        assert!(create_inference(&config).is_err());

        let config = Config {
            model: ModelKind::DeepSeek,
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let (summarizer, _) = create_inference(&config).unwrap();
        assert_eq!(summarizer.model_name(), "DeepSeek");
        assert!(!format!("{:?}", config).contains("test-key"));
    }
}
