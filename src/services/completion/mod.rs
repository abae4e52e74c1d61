/// Text completion service abstraction
///
/// One instruction in, one text answer out. No streaming and no conversation
/// history: every call stands alone.
use crate::{error::AppResult, models::ApiKey};

pub mod chat;

pub use chat::ChatCompletionsClient;

/// Everything a single completion call needs
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub credential: ApiKey,
}

/// Trait for completion services
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one prompt and returns the raw answer text.
    ///
    /// Every failure is reported as `AppError::Invocation` carrying the
    /// underlying message.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;

    /// Service name for logging and debugging
    fn name(&self) -> &'static str;
}
