use std::sync::Arc;
use nd_core::{Result, SentimentModel, SummarizationModel};

use crate::Config;

pub mod deepseek;
pub mod heuristic;

pub use deepseek::DeepSeekModel;
pub use heuristic::HeuristicModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// Offline lead-sentence summaries and lexicon sentiment
    #[default]
    Heuristic,
    /// Chat-completions API (needs MODEL_API_KEY)
    #[value(name = "deepseek")]
    DeepSeek,
}

/// The two model collaborators; a single backend usually serves both.
#[derive(Debug, Clone)]
pub struct Models {
    pub summarization: Arc<dyn SummarizationModel>,
    pub sentiment: Arc<dyn SentimentModel>,
}

pub fn create_models(config: &Config) -> Result<Models> {
    match config.model {
        ModelKind::Heuristic => {
            let model = Arc::new(HeuristicModel::new());
            Ok(Models {
                summarization: model.clone(),
                sentiment: model,
            })
        }
        ModelKind::DeepSeek => {
            let model = Arc::new(DeepSeekModel::new(config.api_key.clone(), config.model_url.clone())?);
            Ok(Models {
                summarization: model.clone(),
                sentiment: model,
            })
        }
    }
}
