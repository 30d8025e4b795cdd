use std::collections::HashMap;
use std::fmt;
use nd_core::{RawSentiment, Result, SentimentModel, SummarizationModel};

/// Offline model: lead-sentence summaries and a word lexicon for sentiment.
pub struct HeuristicModel {
    words: HashMap<&'static str, f32>,
    negations: &'static [&'static str],
}

impl fmt::Debug for HeuristicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicModel")
            .field("lexicon_size", &self.words.len())
            .finish()
    }
}

const POSITIVE_WORDS: &[(&str, f32)] = &[
    ("rally", 0.7),
    ("rallies", 0.7),
    ("rallied", 0.7),
    ("surge", 0.7),
    ("surged", 0.7),
    ("soar", 0.8),
    ("soared", 0.8),
    ("gain", 0.5),
    ("gains", 0.5),
    ("profit", 0.6),
    ("growth", 0.6),
    ("rise", 0.5),
    ("rises", 0.5),
    ("rose", 0.5),
    ("improve", 0.5),
    ("improved", 0.5),
    ("record", 0.4),
    ("strong", 0.5),
    ("success", 0.7),
    ("successful", 0.7),
    ("win", 0.6),
    ("wins", 0.6),
    ("won", 0.6),
    ("breakthrough", 0.8),
    ("cure", 0.7),
    ("recovery", 0.5),
    ("rebound", 0.5),
    ("launch", 0.3),
    ("celebrate", 0.6),
    ("praised", 0.6),
    ("boost", 0.5),
    ("optimistic", 0.6),
    ("innovative", 0.5),
    ("best", 0.5),
    ("good", 0.4),
    ("great", 0.6),
    ("happy", 0.6),
];

const NEGATIVE_WORDS: &[(&str, f32)] = &[
    ("crash", -0.9),
    ("crashed", -0.9),
    ("plunge", -0.8),
    ("plunged", -0.8),
    ("drop", -0.6),
    ("dropped", -0.6),
    ("fall", -0.5),
    ("fell", -0.5),
    ("decline", -0.6),
    ("loss", -0.6),
    ("losses", -0.6),
    ("weak", -0.5),
    ("fear", -0.6),
    ("fears", -0.6),
    ("concern", -0.5),
    ("concerns", -0.5),
    ("risk", -0.4),
    ("crisis", -0.8),
    ("war", -0.8),
    ("attack", -0.8),
    ("killed", -0.9),
    ("dead", -0.8),
    ("death", -0.8),
    ("injured", -0.7),
    ("lawsuit", -0.5),
    ("sued", -0.5),
    ("fraud", -0.8),
    ("scandal", -0.7),
    ("layoffs", -0.7),
    ("recall", -0.5),
    ("outage", -0.6),
    ("breach", -0.7),
    ("hack", -0.6),
    ("delay", -0.4),
    ("delayed", -0.4),
    ("warning", -0.4),
    ("bad", -0.4),
    ("worst", -0.7),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "without", "nor"];

impl Default for HeuristicModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicModel {
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS.iter())
            .copied()
            .collect();
        Self {
            words,
            negations: NEGATIONS,
        }
    }

    /// Sum of lexicon weights, with a preceding negation flipping the sign.
    pub fn score_text(&self, text: &str) -> f32 {
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect();

        let mut total = 0.0;
        for (i, token) in tokens.iter().enumerate() {
            if let Some(weight) = self.words.get(token.as_str()) {
                let negated = i > 0 && self.negations.contains(&tokens[i - 1].as_str());
                total += if negated { -weight } else { *weight };
            }
        }
        total
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = idx + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

#[async_trait::async_trait]
impl SummarizationModel for HeuristicModel {
    fn name(&self) -> &str {
        "Heuristic"
    }

    async fn summarize(&self, text: &str, max_words: usize) -> Result<String> {
        let mut summary: Vec<&str> = Vec::new();
        for sentence in split_sentences(text) {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            if summary.len() + words.len() > max_words {
                if summary.is_empty() {
                    summary.extend(words.into_iter().take(max_words));
                }
                break;
            }
            summary.extend(words);
        }
        Ok(summary.join(" "))
    }
}

#[async_trait::async_trait]
impl SentimentModel for HeuristicModel {
    fn name(&self) -> &str {
        "Heuristic"
    }

    async fn classify(&self, text: &str) -> Result<RawSentiment> {
        let total = self.score_text(text);
        let magnitude = total.abs();

        if magnitude < 0.25 {
            return Ok(RawSentiment::new("NEUTRAL", 1.0 - magnitude));
        }

        let confidence = 0.5 + 0.5 * (magnitude / (magnitude + 1.0));
        let label = if total > 0.0 { "POSITIVE" } else { "NEGATIVE" };
        Ok(RawSentiment::new(label, confidence))
    }
}
