//! Optional external feedback enhancement
//!
//! An [`Enhancer`] decorates a deterministic evaluation with supplementary
//! free-text insight from a chat-completion provider. Enhancement is strictly
//! additive: it runs after scoring, under a bounded timeout, and any failure
//! is swallowed by the caller. It can never block or alter the numeric score.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EnhancerError;
use crate::evaluator::Evaluation;
use crate::question::QuestionRecord;

/// Supported chat-completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    Ollama,
    OpenAi,
}

impl Provider {
    /// Chat-completions endpoint for the provider
    fn chat_url(self, config: &EnhancerConfig) -> String {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1/chat/completions".to_string(),
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions".to_string(),
            Provider::Ollama => format!("{}/v1/chat/completions", config.ollama_base_url),
        }
    }
}

/// Configuration for the chat-completion enhancer
#[derive(Debug, Clone)]
pub struct EnhancerConfig {
    pub provider: Provider,
    pub model: String,
    /// Required for hosted providers; unused by Ollama
    pub api_key: Option<String>,
    pub ollama_base_url: String,
    /// Per-request timeout, enforced on the HTTP call itself
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Ollama,
            model: "llama3.1:latest".to_string(),
            api_key: None,
            ollama_base_url: "http://localhost:11434".to_string(),
            timeout: Duration::from_secs(5),
            max_tokens: 150,
        }
    }
}

/// Produces supplementary insight for an evaluated answer
#[async_trait]
pub trait Enhancer: Send + Sync {
    /// Return a short free-text insight for the answer
    async fn enhance(
        &self,
        question: &QuestionRecord,
        answer: &str,
        evaluation: &Evaluation,
    ) -> Result<String, EnhancerError>;
}

/// Enhancer that never produces insight
///
/// The default: the engine works fully without any external provider.
pub struct NoopEnhancer;

#[async_trait]
impl Enhancer for NoopEnhancer {
    async fn enhance(
        &self,
        _question: &QuestionRecord,
        _answer: &str,
        _evaluation: &Evaluation,
    ) -> Result<String, EnhancerError> {
        Ok(String::new())
    }
}

// ── Chat-completion wire types (OpenAI-compatible) ──────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Enhancer backed by an OpenAI-compatible chat-completions API
pub struct ChatCompletionEnhancer {
    client: reqwest::Client,
    config: EnhancerConfig,
}

impl ChatCompletionEnhancer {
    pub fn new(config: EnhancerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Build an enhancer for the configured provider
    ///
    /// Fails when a hosted provider is selected without an API key.
    pub fn from_provider(config: EnhancerConfig) -> Result<Self, EnhancerError> {
        match config.provider {
            Provider::Groq | Provider::OpenAi if config.api_key.is_none() => Err(
                EnhancerError::NotConfigured(format!("{:?} requires an API key", config.provider)),
            ),
            _ => Ok(Self::new(config)),
        }
    }

    fn build_prompt(question: &QuestionRecord, answer: &str) -> String {
        format!(
            "Question: {}\n\nAnswer: {}\n\nExpected: {}\n\nProvide brief additional insight:",
            question.text,
            answer,
            question.expected_answer.as_deref().unwrap_or("N/A"),
        )
    }
}

#[async_trait]
impl Enhancer for ChatCompletionEnhancer {
    async fn enhance(
        &self,
        question: &QuestionRecord,
        answer: &str,
        _evaluation: &Evaluation,
    ) -> Result<String, EnhancerError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are an expert technical interviewer. Provide constructive \
                              feedback."
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: Self::build_prompt(question, answer),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: 0.7,
        };

        let mut builder = self
            .client
            .post(self.config.provider.chat_url(&self.config))
            .timeout(self.config.timeout)
            .json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?.error_for_status()?;
        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| EnhancerError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| EnhancerError::Malformed("no choices in completion".to_string()))
    }
}

/// Test double with scripted behavior
pub struct MockEnhancer {
    insight: Option<String>,
}

impl MockEnhancer {
    /// Always returns the given insight
    pub fn succeeding(insight: impl Into<String>) -> Self {
        Self {
            insight: Some(insight.into()),
        }
    }

    /// Always fails
    pub fn failing() -> Self {
        Self { insight: None }
    }
}

#[async_trait]
impl Enhancer for MockEnhancer {
    async fn enhance(
        &self,
        _question: &QuestionRecord,
        _answer: &str,
        _evaluation: &Evaluation,
    ) -> Result<String, EnhancerError> {
        match &self.insight {
            Some(insight) => Ok(insight.clone()),
            None => Err(EnhancerError::NotConfigured("mock failure".to_string())),
        }
    }
}
