use crate::error::{ClassifyError, Result};
use providers::{EmbeddingProvider, ProviderError};
use std::sync::Arc;
use tracing::debug;

pub type EmbeddingVector = Vec<f32>;

#[derive(Clone)]
pub struct EmbeddingGateway {
    provider: Arc<dyn EmbeddingProvider>,
    dimension: Option<usize>,
}

impl EmbeddingGateway {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            dimension: None,
        }
    }

    /// Rejects vectors whose length differs from `dimension`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        if text.trim().is_empty() {
            return Err(ClassifyError::InvalidInput(
                "description is empty".to_string(),
            ));
        }

        debug!(chars = text.len(), "requesting embedding");
        let resp = self
            .provider
            .embed(&[text.to_string()])
            .await
            .map_err(ClassifyError::EmbeddingService)?;

        let vector = resp
            .vectors
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or(ClassifyError::EmbeddingService(ProviderError::EmptyResponse))?;

        if let Some(expected) = self.dimension {
            if vector.len() != expected {
                return Err(ClassifyError::EmbeddingService(
                    ProviderError::InvalidResponse(format!(
                        "expected {} dimensions, got {}",
                        expected,
                        vector.len()
                    )),
                ));
            }
        }
        Ok(vector)
    }
}
