//! Wiring: builds the gateways and the classifier from configuration.
//!
//! Secrets are read from the environment here and nowhere else.

use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::decision::DecisionGateway;
use crate::embeddings::EmbeddingGateway;
use crate::error::ClassifyError;
use crate::retriever::{CandidateRetriever, RetrievalOptions};
use crate::vectorstore::{NoopVectorStore, QdrantStore, VectorStore};
use anyhow::Context;
use providers::noop::NoopProvider;
use providers::openai::{OpenAiConfig, OpenAiProvider, DEFAULT_BASE_URL};
use providers::qdrant::{QdrantClient, QdrantConfig};
use providers::ProviderRegistry;
use std::sync::Arc;
use storage::ReferenceStore;
use tracing::{info, warn};

pub fn build_registry(config: &AppConfig) -> anyhow::Result<ProviderRegistry> {
    let mut reg = ProviderRegistry::new()
        .with_embedding("noop", Arc::new(NoopProvider))
        .with_llm("noop", Arc::new(NoopProvider));

    if let Some(key) = std::env::var_os("OPENAI_API_KEY") {
        let base = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let provider = OpenAiProvider::new(OpenAiConfig {
            api_key: key.to_string_lossy().into_owned(),
            base_url: base,
            embedding_model: config.embeddings.model.clone(),
            chat_model: config.decision.model.clone(),
            timeout: config.http.timeout(),
        })
        .context("build openai client")?;
        let provider = Arc::new(provider);
        reg = reg
            .with_embedding("openai", provider.clone())
            .with_llm("openai", provider);
    } else {
        warn!("OPENAI_API_KEY not set, openai provider unavailable");
    }

    Ok(reg
        .set_preferred_embedding(&config.embeddings.provider)
        .set_preferred_llm(&config.decision.provider))
}

pub fn build_vector_store(config: &AppConfig) -> anyhow::Result<Arc<dyn VectorStore>> {
    match config.vectors.provider.as_str() {
        "qdrant" => {
            let url = config
                .vectors
                .url
                .clone()
                .or_else(|| std::env::var("QDRANT_CLUSTER").ok())
                .context("qdrant selected but neither vectors.url nor QDRANT_CLUSTER is set")?;
            let client = QdrantClient::new(QdrantConfig {
                url,
                api_key: std::env::var("QDRANT_API_KEY").ok(),
                hnsw_ef: config.vectors.hnsw_ef,
                exact: config.vectors.exact,
                timeout: config.http.timeout(),
            })
            .context("build qdrant client")?;
            Ok(Arc::new(QdrantStore::new(client)))
        }
        "noop" => {
            warn!("vector store disabled, classifications will be ungrounded");
            Ok(Arc::new(NoopVectorStore))
        }
        other => anyhow::bail!("unknown vector provider: {other}"),
    }
}

pub fn retrieval_options(config: &AppConfig) -> RetrievalOptions {
    RetrievalOptions {
        collections: config.vectors.collections.clone(),
        limit_per_collection: config.vectors.limit_per_collection,
    }
}

pub fn load_reference_store(config: &AppConfig) -> anyhow::Result<ReferenceStore> {
    ReferenceStore::load(&config.reference.path)
        .map_err(ClassifyError::from)
        .with_context(|| format!("load reference data from {}", config.reference.path))
}

pub fn build_classifier(config: &AppConfig) -> anyhow::Result<Classifier> {
    let store = Arc::new(load_reference_store(config)?);
    let registry = build_registry(config)?;
    let embedder = registry
        .embedding(None)
        .with_context(|| format!("embedding provider {:?}", config.embeddings.provider))?;
    let llm = registry
        .llm(None)
        .with_context(|| format!("decision provider {:?}", config.decision.provider))?;
    let vectors = build_vector_store(config)?;

    info!(
        classes = store.len(),
        collections = ?config.vectors.collections,
        limit = config.vectors.limit_per_collection,
        "classifier ready"
    );
    Ok(Classifier::new(
        EmbeddingGateway::new(embedder).with_dimension(config.embeddings.dimension),
        CandidateRetriever::new(vectors),
        DecisionGateway::new(llm),
        store,
        retrieval_options(config),
    ))
}
