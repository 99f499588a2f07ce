use crate::decision::DecisionGateway;
use crate::embeddings::EmbeddingGateway;
use crate::error::Result;
use crate::prompt::{self, ClassificationMessage};
use crate::retriever::{CandidateRetriever, CandidateSet, RetrievalOptions};
use serde::Serialize;
use std::sync::Arc;
use storage::ReferenceStore;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub answer: String,
    pub candidates: CandidateSet,
    pub messages: Vec<ClassificationMessage>,
}

/// End-to-end pipeline: embed → retrieve → assemble → decide.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Classifier {
    embeddings: EmbeddingGateway,
    retriever: CandidateRetriever,
    decision: DecisionGateway,
    store: Arc<ReferenceStore>,
    defaults: RetrievalOptions,
}

impl Classifier {
    pub fn new(
        embeddings: EmbeddingGateway,
        retriever: CandidateRetriever,
        decision: DecisionGateway,
        store: Arc<ReferenceStore>,
        defaults: RetrievalOptions,
    ) -> Self {
        Self {
            embeddings,
            retriever,
            decision,
            store,
            defaults,
        }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    pub fn defaults(&self) -> &RetrievalOptions {
        &self.defaults
    }

    pub async fn classify(&self, description: &str) -> Result<String> {
        self.classify_with(description, &self.defaults).await
    }

    pub async fn classify_with(
        &self,
        description: &str,
        options: &RetrievalOptions,
    ) -> Result<String> {
        Ok(self.classify_detailed(description, options).await?.answer)
    }

    pub async fn classify_detailed(
        &self,
        description: &str,
        options: &RetrievalOptions,
    ) -> Result<Classification> {
        let (candidates, messages) = self.prompt(description, options).await?;
        let answer = self.decide(&messages).await?;
        info!(candidates = candidates.len(), "classification complete");
        Ok(Classification {
            answer,
            candidates,
            messages,
        })
    }

    pub async fn candidates(
        &self,
        description: &str,
        options: &RetrievalOptions,
    ) -> Result<CandidateSet> {
        options.validate()?;
        let vector = self.embeddings.embed(description).await?;
        self.retriever
            .retrieve(&vector, &options.collections, options.limit_per_collection)
            .await
    }

    pub async fn prompt(
        &self,
        description: &str,
        options: &RetrievalOptions,
    ) -> Result<(CandidateSet, Vec<ClassificationMessage>)> {
        let candidates = self.candidates(description, options).await?;
        let messages = prompt::assemble(description, &candidates, &self.store);
        Ok((candidates, messages))
    }

    pub async fn decide(&self, messages: &[ClassificationMessage]) -> Result<String> {
        self.decision.decide(messages).await
    }
}
