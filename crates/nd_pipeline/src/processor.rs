use std::time::Instant;
use nd_core::{ArticleSource, NewsQuery, ProcessedArticle, RawArticle, Result, RunResult};
use nd_inference::{SentimentClassifier, Summarizer};
use tracing::{info, warn};

/// The text an article is judged by: body, then description, then title.
pub fn select_text(article: &RawArticle) -> &str {
    [&article.content, &article.description, &article.title]
        .into_iter()
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .unwrap_or("")
}

#[derive(Debug, Clone)]
pub struct ArticleProcessor {
    summarizer: Summarizer,
    classifier: SentimentClassifier,
}

impl ArticleProcessor {
    pub fn new(summarizer: Summarizer, classifier: SentimentClassifier) -> Self {
        Self { summarizer, classifier }
    }

    async fn process_article(&self, article: &RawArticle) -> ProcessedArticle {
        let text = select_text(article);

        // Both collaborators see the selected text; the summary is never classified.
        let summary = self.summarizer.summarize(text).await;
        let classification = self.classifier.analyze(text).await;

        ProcessedArticle {
            title: article.title.clone(),
            original_length: text.chars().count(),
            summary,
            sentiment: classification.label,
            score: classification.score,
            source: article.source.clone(),
            published_at: article.published_at.clone(),
            url: article.url.clone(),
        }
    }

    /// One record per input article, in input order. Collaborator failures
    /// degrade the affected record and never stop the batch.
    pub async fn process(&self, articles: &[RawArticle]) -> RunResult {
        let mut results = Vec::with_capacity(articles.len());
        for (i, article) in articles.iter().enumerate() {
            info!("📰 [{}/{}] Processing article: {}", i + 1, articles.len(), article.title);
            let processed = self.process_article(article).await;
            if processed.is_degraded() {
                warn!("⚠️ [{}/{}] Degraded record for: {}", i + 1, articles.len(), processed.title);
            } else {
                info!("✨ [{}/{}] {} ({})", i + 1, articles.len(), processed.sentiment, processed.title);
            }
            results.push(processed);
        }
        results
    }

    /// Fetch from `source` and process the batch. A failed fetch ends the run
    /// with no partial results.
    pub async fn run(&self, source: &dyn ArticleSource, query: &NewsQuery) -> Result<RunResult> {
        let started = Instant::now();
        let articles = source.fetch(query).await?;
        if articles.is_empty() {
            info!("🫙 {} returned no articles", source.name());
        }

        let results = self.process(&articles).await;
        info!(
            "✅ Processed {} articles in {:.2} seconds",
            results.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::{
        Category, Country, Error, RawSentiment, Sentiment, SentimentModel, SummarizationModel,
        MAX_ARTICLES, SUMMARY_UNAVAILABLE,
    };
    use nd_inference::{ClassifierConfig, SummarizerConfig};
    use std::sync::{Arc, Mutex};

    /// Summarizes to the first three words; fails on any text containing "POISON".
    #[derive(Debug, Default)]
    struct MockSummarizer;

    #[async_trait]
    impl SummarizationModel for MockSummarizer {
        fn name(&self) -> &str {
            "mock"
        }

        async fn summarize(&self, text: &str, _max_words: usize) -> Result<String> {
            if text.contains("POISON") {
                return Err(Error::Inference("summarizer choked".to_string()));
            }
            Ok(text.split_whitespace().take(3).collect::<Vec<_>>().join(" "))
        }
    }

    /// Positive for "rally", negative for "crash", fails on "CURSED"; records every input.
    #[derive(Debug, Default)]
    struct MockClassifier {
        inputs: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SentimentModel for MockClassifier {
        fn name(&self) -> &str {
            "mock"
        }

        async fn classify(&self, text: &str) -> Result<RawSentiment> {
            self.inputs.lock().unwrap().push(text.to_string());
            if text.contains("CURSED") {
                return Err(Error::Inference("classifier choked".to_string()));
            }
            let lower = text.to_lowercase();
            if lower.contains("rally") {
                Ok(RawSentiment::new("POSITIVE", 0.95))
            } else if lower.contains("crash") {
                Ok(RawSentiment::new("NEGATIVE", 0.9))
            } else {
                Ok(RawSentiment::new("NEUTRAL", 0.8))
            }
        }
    }

    struct MockSource {
        articles: Vec<RawArticle>,
        fail: bool,
    }

    #[async_trait]
    impl ArticleSource for MockSource {
        fn name(&self) -> &str {
            "mock"
        }

        async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawArticle>> {
            if self.fail {
                return Err(Error::SourceUnavailable("apiKeyInvalid".to_string()));
            }
            Ok(self.articles.iter().take(query.count()).cloned().collect())
        }
    }

    fn processor(classifier: Arc<MockClassifier>) -> ArticleProcessor {
        ArticleProcessor::new(
            Summarizer::new(Arc::new(MockSummarizer), SummarizerConfig::default()),
            SentimentClassifier::new(classifier, ClassifierConfig::default()),
        )
    }

    fn article(title: &str, description: &str, content: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            source: "Wire".to_string(),
            published_at: "2024-05-01T10:00:00Z".to_string(),
            url: format!("https://example.com/{}", title.len()),
        }
    }

    fn batch(n: usize) -> Vec<RawArticle> {
        (0..n)
            .map(|i| {
                article(
                    &format!("Story {}", i),
                    "",
                    &format!("Story number {} describes how the markets rally after a long quiet week.", i),
                )
            })
            .collect()
    }

    #[test]
    fn test_select_text_fallback_chain() {
        assert_eq!(select_text(&article("T", "D", "C")), "C");
        assert_eq!(select_text(&article("T", "D", "  ")), "D");
        assert_eq!(select_text(&article("T", "", "")), "T");
        assert_eq!(select_text(&article("", "", "")), "");
    }

    #[tokio::test]
    async fn test_title_only_article_is_classified_by_title() {
        let classifier = Arc::new(MockClassifier::default());
        let results = processor(classifier.clone())
            .process(&[article("Markets rally", "", "")])
            .await;

        assert_eq!(classifier.inputs.lock().unwrap().as_slice(), ["Markets rally"]);
        assert_eq!(results[0].sentiment, Sentiment::Positive);
        assert_eq!(results[0].summary, "Markets rally");
        assert_eq!(results[0].original_length, 13);
    }

    #[tokio::test]
    async fn test_classifier_sees_text_not_summary() {
        let classifier = Arc::new(MockClassifier::default());
        let body = "Officials said on Friday that the storm will crash into the coast by evening.";
        processor(classifier.clone())
            .process(&[article("Storm", "desc", body)])
            .await;

        assert_eq!(classifier.inputs.lock().unwrap().as_slice(), [body]);
    }

    #[tokio::test]
    async fn test_order_and_cardinality_preserved() {
        let input = batch(7);
        let results = processor(Arc::new(MockClassifier::default())).process(&input).await;

        assert_eq!(results.len(), input.len());
        for (raw, processed) in input.iter().zip(&results) {
            assert_eq!(raw.title, processed.title);
            assert_eq!(raw.source, processed.source);
        }
    }

    #[tokio::test]
    async fn test_summarizer_failure_is_isolated() {
        let input = vec![
            article("First", "", "The first story explains how the markets rally again today."),
            article("Poisoned", "", "POISON in this body makes the summarizer fail but the markets rally."),
            article("Third", "", "The third story covers a crash in commodity prices this morning."),
        ];
        let results = processor(Arc::new(MockClassifier::default())).process(&input).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[1].summary, SUMMARY_UNAVAILABLE);
        assert_eq!(results[1].sentiment, Sentiment::Positive);
        assert!(results[1].is_degraded());
        assert_eq!(results[2].summary, "The third story");
        assert_eq!(results[2].sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_classifier_failure_is_isolated() {
        let input = vec![
            article("Cursed", "", "CURSED text that the classifier cannot handle at all today."),
            article("Fine", "", "A fine story about how the markets rally once more this week."),
        ];
        let results = processor(Arc::new(MockClassifier::default())).process(&input).await;

        assert_eq!(results[0].sentiment, Sentiment::Unknown);
        assert_eq!(results[0].score, None);
        assert_eq!(results[0].summary, "CURSED text that");
        assert_eq!(results[1].sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_labels_stay_in_closed_set() {
        let input = vec![
            article("", "", ""),
            article("Markets rally", "", ""),
            article("x", "CURSED", ""),
            article("y", "", "POISON and crash"),
        ];
        let results = processor(Arc::new(MockClassifier::default())).process(&input).await;

        for result in &results {
            assert!(matches!(
                result.sentiment,
                Sentiment::Positive | Sentiment::Neutral | Sentiment::Negative | Sentiment::Unknown
            ));
        }
        assert_eq!(results[0].sentiment, Sentiment::Neutral);
        assert_eq!(results[0].summary, "");
    }

    #[tokio::test]
    async fn test_processing_is_idempotent() {
        let input = batch(4);
        let processor = processor(Arc::new(MockClassifier::default()));

        let first = processor.process(&input).await;
        let second = processor.process(&input).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_run_respects_requested_count() {
        let processor = processor(Arc::new(MockClassifier::default()));
        let source = MockSource { articles: batch(MAX_ARTICLES), fail: false };

        for n in 1..=MAX_ARTICLES {
            let query = NewsQuery::new(Category::Business, Country::Us, n);
            let results = processor.run(&source, &query).await.unwrap();
            assert_eq!(results.len(), n);
        }

        let short = MockSource { articles: batch(2), fail: false };
        let query = NewsQuery::new(Category::Business, Country::Us, 5);
        assert_eq!(processor.run(&short, &query).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_run_propagates_source_failure() {
        let processor = processor(Arc::new(MockClassifier::default()));
        let source = MockSource { articles: batch(3), fail: true };

        let err = processor.run(&source, &NewsQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }
}
