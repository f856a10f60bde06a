use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
    Client as OpenAiClient,
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Prompt used to check that the local model answers at all
pub const CONNECTION_TEST_PROMPT: &str =
    "Hello, this is a test message. Please respond with \"Ollama is working correctly.\"";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request timed out after {0}s")]
    Timeout(u64),

    #[error("LLM API error: {0}")]
    Api(String),

    #[error("Empty response from LLM")]
    EmptyResponse,
}

/// Where the local model lives and how it is sampled
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible API base, e.g. Ollama's `/v1`
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    /// llama3 on a local Ollama server
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434/v1".to_string(),
            model: "llama3".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

/// Text generated for one prompt
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub tokens_used: Option<u32>,
}

/// Anything that can complete a prompt
#[async_trait(?Send)]
pub trait LanguageModel {
    async fn complete(&self, prompt: String) -> Result<Completion, LlmError>;
}

/// Chat-completions client for a locally hosted model
///
/// One request per prompt: no retries and no conversation history.
pub struct LlmClient {
    client: OpenAiClient<OpenAIConfig>,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        tracing::info!("Using model {} at {}", config.model, config.base_url);

        // Ollama ignores the key, but the client always sends one
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.base_url.clone())
            .with_api_key("ollama");

        Self {
            client: OpenAiClient::with_config(openai_config),
            config,
        }
    }

    /// Send a fixed greeting and return the model's reply
    pub async fn check_connection(&self) -> Result<Completion, LlmError> {
        self.complete(CONNECTION_TEST_PROMPT.to_string()).await
    }

    fn chat_request(&self, prompt: String) -> CreateChatCompletionRequest {
        CreateChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(prompt),
                    name: None,
                },
            )],
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            ..Default::default()
        }
    }
}

#[async_trait(?Send)]
impl LanguageModel for LlmClient {
    async fn complete(&self, prompt: String) -> Result<Completion, LlmError> {
        let prompt_bytes = prompt.len();
        let request = self.chat_request(prompt);
        let limit = self.config.timeout_seconds;

        let response = tokio::time::timeout(Duration::from_secs(limit), self.client.chat().create(request))
            .await
            .map_err(|_| LlmError::Timeout(limit))?
            .map_err(|e| LlmError::Api(e.to_string()))?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        tracing::debug!(
            prompt_bytes,
            answer_bytes = text.len(),
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Completion from {}",
            response.model
        );

        Ok(Completion {
            text,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
        })
    }
}
