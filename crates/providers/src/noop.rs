use crate::{ChatMessage, ChatResponse, EmbedResponse, EmbeddingProvider, LlmProvider, ProviderError};

/// Placeholder provider for deployments without credentials.
///
/// Every call fails with [`ProviderError::NotImplemented`]; it never yields a vector or an answer.
#[derive(Debug, Default)]
pub struct NoopProvider;

#[async_trait::async_trait]
impl EmbeddingProvider for NoopProvider {
    async fn embed(&self, _texts: &[String]) -> Result<EmbedResponse, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}

#[async_trait::async_trait]
impl LlmProvider for NoopProvider {
    async fn chat(&self, _messages: &[ChatMessage]) -> Result<ChatResponse, ProviderError> {
        Err(ProviderError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_refuses_to_embed_or_chat() {
        let p = NoopProvider;
        assert!(matches!(
            p.embed(&["lathe".to_string()]).await,
            Err(ProviderError::NotImplemented)
        ));
        assert!(matches!(
            p.chat(&[ChatMessage::user("hi")]).await,
            Err(ProviderError::NotImplemented)
        ));
    }
}
