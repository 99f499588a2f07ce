use crate::error::{ClassifyError, Result};
use crate::prompt::ClassificationMessage;
use providers::{ChatMessage, LlmProvider, ProviderError};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct DecisionGateway {
    provider: Arc<dyn LlmProvider>,
}

impl DecisionGateway {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub async fn decide(&self, messages: &[ClassificationMessage]) -> Result<String> {
        let wire = to_wire(messages);
        debug!(messages = wire.len(), "requesting decision");
        let resp = self
            .provider
            .chat(&wire)
            .await
            .map_err(ClassifyError::DecisionService)?;
        if resp.content.is_empty() {
            return Err(ClassifyError::DecisionService(ProviderError::EmptyResponse));
        }
        Ok(resp.content)
    }
}

/// Chat APIs only know system/user/assistant; grounding and instructions both go as user turns.
pub fn to_wire(messages: &[ClassificationMessage]) -> Vec<ChatMessage> {
    messages
        .iter()
        .map(|m| ChatMessage::user(m.content.clone()))
        .collect()
}
