/// OpenAI-compatible chat completions client (Groq by default)
use crate::{
    error::{AppError, AppResult},
    services::completion::{CompletionRequest, CompletionService},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone)]
pub struct ChatCompletionsClient {
    http_client: HttpClient,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(endpoint: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build completion client: {}", e)))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    fn build_body(request: &CompletionRequest) -> ChatRequest<'_> {
        ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
        }
    }

    fn parse_response(text: &str) -> AppResult<String> {
        let parsed: ChatResponse = serde_json::from_str(text)
            .map_err(|e| AppError::Invocation(format!("Failed to parse completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| {
                AppError::Invocation("completion response contained no choices".to_string())
            })
    }
}

#[async_trait::async_trait]
impl CompletionService for ChatCompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let body = Self::build_body(&request);

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(request.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Invocation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Invocation(format!("HTTP {}: {}", status, text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Invocation(e.to_string()))?;
        let content = Self::parse_response(&text)?;

        tracing::info!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            answer_chars = content.len(),
            service = self.name(),
            "Completion received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "chat_completions"
    }
}
