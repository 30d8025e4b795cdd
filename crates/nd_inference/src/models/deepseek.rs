use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use nd_core::{Error, RawSentiment, Result, SentimentModel, SummarizationModel};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
const CHAT_MODEL: &str = "deepseek-chat";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completions backend. Any OpenAI-compatible endpoint works through `base_url`.
pub struct DeepSeekModel {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for DeepSeekModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl DeepSeekModel {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration("DeepSeek API key is required".to_string()))?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| Error::Configuration(format!("Invalid model URL {}: {}", base_url, e)))?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    async fn chat(&self, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.0,
        };

        let body = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_chat_response(&body)
    }
}

/// Content of the first choice of a chat-completions answer.
pub(crate) fn parse_chat_response(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| Error::Inference("DeepSeek returned no choices".to_string()))
}

/// Parse replies of the form `POSITIVE 0.87`. A missing score counts as full confidence.
pub(crate) fn parse_sentiment_reply(reply: &str) -> Result<RawSentiment> {
    let mut parts = reply
        .split(|c: char| c.is_whitespace() || c == ',' || c == ':')
        .filter(|p| !p.is_empty());

    let label = parts
        .next()
        .map(|l| l.trim_matches(|c: char| !c.is_alphanumeric() && c != '_'))
        .filter(|l| !l.is_empty())
        .ok_or_else(|| Error::Inference(format!("Empty sentiment reply: {:?}", reply)))?;

    let score = match parts.next() {
        Some(raw) => raw
            .trim_end_matches('.')
            .parse::<f32>()
            .map_err(|e| Error::Inference(format!("Invalid sentiment score {:?}: {}", raw, e)))?,
        None => 1.0,
    };

    Ok(RawSentiment::new(label, score))
}

#[async_trait]
impl SummarizationModel for DeepSeekModel {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn summarize(&self, text: &str, max_words: usize) -> Result<String> {
        let prompt = format!(
            "Summarize the following news article in at most {} words. \
             Reply with the summary only.\n\n{}\n\nSummary:",
            max_words, text
        );
        let summary = self.chat(prompt).await?;
        tracing::debug!("Generated summary: {}", summary);
        Ok(summary)
    }
}

#[async_trait]
impl SentimentModel for DeepSeekModel {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn classify(&self, text: &str) -> Result<RawSentiment> {
        let prompt = format!(
            "Classify the sentiment of the following news text as POSITIVE, NEGATIVE or NEUTRAL. \
             Reply with the label followed by your confidence between 0 and 1, for example \
             \"POSITIVE 0.87\", and nothing else.\n\n{}",
            text
        );
        let reply = self.chat(prompt).await?;
        parse_sentiment_reply(&reply)
    }
}
