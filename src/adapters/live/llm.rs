//! Live adapters for the `LlmClient` port.
//!
//! Two providers are supported: the OpenAI chat-completions API and the
//! Anthropic messages API. Credentials are passed in at construction; the
//! adapters never read the environment themselves.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Code-generation providers with a live adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    /// OpenAI chat completions.
    #[default]
    #[value(name = "openai")]
    OpenAi,
    /// Anthropic messages.
    Anthropic,
}

impl Provider {
    /// Environment variable conventionally holding this provider's key.
    #[must_use]
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Builds the live client for this provider.
    #[must_use]
    pub fn client(self, api_key: impl Into<String>) -> Box<dyn LlmClient> {
        match self {
            Self::OpenAi => Box::new(OpenAiClient::new(api_key)),
            Self::Anthropic => Box::new(AnthropicClient::new(api_key)),
        }
    }
}

/// Live LLM client that calls the OpenAI chat-completions API.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    /// Creates a client authenticated with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { client: Client::new(), api_key: api_key.into() }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error envelope shared by both providers: `{"error": {"message": ...}}`.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl LlmClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = ChatRequest {
                model: &request.model,
                messages: [
                    ChatMessage { role: "system", content: &request.system },
                    ChatMessage { role: "user", content: &request.prompt },
                ],
                temperature: request.temperature,
                max_tokens: request.max_tokens,
                top_p: request.top_p,
                frequency_penalty: 0.0,
                presence_penalty: 0.0,
                response_format: ResponseFormat { kind: "text" },
            };

            let response = self
                .client
                .post(OPENAI_API_URL)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> BoxError { format!("OpenAI API request failed: {e}").into() })?;

            let response_text = read_success_body(response, "OpenAI").await?;

            let api_response: ChatResponse =
                serde_json::from_str(&response_text).map_err(|e| -> BoxError {
                    format!("Failed to parse OpenAI API response: {e}").into()
                })?;

            let text = api_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default();
            let (prompt_tokens, completion_tokens) = api_response
                .usage
                .map_or((0, 0), |usage| (usage.prompt_tokens, usage.completion_tokens));

            Ok(CompletionResponse { text, prompt_tokens, completion_tokens })
        })
    }
}

/// Live LLM client that calls the Anthropic messages API.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
}

impl AnthropicClient {
    /// Creates a client authenticated with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { client: Client::new(), api_key: api_key.into() }
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    temperature: f32,
    top_p: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl LlmClient for AnthropicClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = AnthropicRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                system: &request.system,
                temperature: request.temperature,
                top_p: request.top_p,
                messages: vec![ChatMessage { role: "user", content: &request.prompt }],
            };

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> BoxError { format!("Anthropic API request failed: {e}").into() })?;

            let response_text = read_success_body(response, "Anthropic").await?;

            let api_response: AnthropicResponse =
                serde_json::from_str(&response_text).map_err(|e| -> BoxError {
                    format!("Failed to parse Anthropic API response: {e}").into()
                })?;

            let text = api_response.content.into_iter().map(|block| block.text).collect::<String>();

            Ok(CompletionResponse {
                text,
                prompt_tokens: api_response.usage.input_tokens,
                completion_tokens: api_response.usage.output_tokens,
            })
        })
    }
}

/// Reads the response body, turning non-success statuses into an error that
/// carries the provider's own message when one is present.
async fn read_success_body(response: reqwest::Response, provider: &str) -> Result<String, BoxError> {
    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| -> BoxError { format!("Failed to read {provider} API response: {e}").into() })?;

    if !status.is_success() {
        return Err(api_error_message(provider, status.as_u16(), response_text).into());
    }
    Ok(response_text)
}

fn api_error_message(provider: &str, status: u16, body: String) -> String {
    let msg = serde_json::from_str::<ApiError>(&body).map(|e| e.error.message).unwrap_or(body);
    format!("{provider} API error ({status}): {msg}")
}
