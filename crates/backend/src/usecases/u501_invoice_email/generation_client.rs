use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::shared::llm::{ChatMessage, LlmProvider};

/// Текст, который возвращается вместо пустого ответа сервиса
pub const EMPTY_RESPONSE_FALLBACK: &str = "Failed to generate email content. Please try again.";

/// Ошибка генерации для вызывающей стороны
///
/// Причина (сеть, HTTP-статус, разбор ответа, таймаут) пишется в лог
/// и наружу не передаётся.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("generation failed")]
    Failed,
}

/// Генератор текста письма по готовой инструкции
#[async_trait]
pub trait EmailGenerator: Send + Sync {
    async fn send(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Генератор поверх LLM провайдера
pub struct LlmEmailGenerator {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl LlmEmailGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }
}

#[async_trait]
impl EmailGenerator for LlmEmailGenerator {
    async fn send(&self, prompt: &str) -> Result<String, GenerationError> {
        let messages = vec![ChatMessage::user(prompt)];
        let call = self.provider.chat_completion(messages);

        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!(
                    provider = self.provider.provider_name(),
                    "Invoice email generation failed: {}",
                    e
                );
                return Err(GenerationError::Failed);
            }
            Err(_) => {
                tracing::error!(
                    provider = self.provider.provider_name(),
                    "Invoice email generation timed out after {:?}",
                    self.timeout
                );
                return Err(GenerationError::Failed);
            }
        };

        tracing::debug!(
            model = %response.model,
            tokens = ?response.tokens_used,
            finish_reason = ?response.finish_reason,
            "Invoice email generated"
        );

        if response.content.trim().is_empty() {
            tracing::warn!("LLM returned an empty email, using fallback text");
            return Ok(EMPTY_RESPONSE_FALLBACK.to_string());
        }

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::llm::{LlmError, LlmResponse};

    enum Reply {
        Text(&'static str),
        Error,
        Hang,
    }

    struct FakeProvider {
        reply: Reply,
    }

    #[async_trait]
    impl LlmProvider for FakeProvider {
        async fn chat_completion(
            &self,
            messages: Vec<ChatMessage>,
        ) -> Result<LlmResponse, LlmError> {
            assert_eq!(messages.len(), 1);
            match self.reply {
                Reply::Text(text) => Ok(LlmResponse {
                    content: text.to_string(),
                    tokens_used: Some(42),
                    model: "fake".into(),
                    finish_reason: None,
                }),
                Reply::Error => Err(LlmError::ApiError(
                    "connect error: tcp 10.0.0.1:443 refused".into(),
                )),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!()
                }
            }
        }

        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    fn generator(reply: Reply) -> LlmEmailGenerator {
        LlmEmailGenerator::new(Arc::new(FakeProvider { reply }), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_returns_text_as_provided() {
        let text = "\nSubject: Invoice\n\nDear Acme Corp,\n";
        let result = generator(Reply::Text(text)).send("prompt").await;
        assert_eq!(result, Ok(text.to_string()));
    }

    #[tokio::test]
    async fn test_empty_payload_uses_fallback() {
        let result = generator(Reply::Text("")).send("prompt").await;
        assert_eq!(result, Ok(EMPTY_RESPONSE_FALLBACK.to_string()));

        let result = generator(Reply::Text("  \n ")).send("prompt").await;
        assert_eq!(result, Ok(EMPTY_RESPONSE_FALLBACK.to_string()));
    }

    #[tokio::test]
    async fn test_provider_error_is_opaque() {
        let err = generator(Reply::Error).send("prompt").await.unwrap_err();
        assert_eq!(err, GenerationError::Failed);
        assert_eq!(err.to_string(), "generation failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let result = generator(Reply::Hang).send("prompt").await;
        assert_eq!(result, Err(GenerationError::Failed));
    }
}
