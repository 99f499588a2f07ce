use providers::qdrant::QdrantClient;
use providers::ProviderError;
use storage::ClassId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub class_id: ClassId,
    pub score: f32,
}

#[async_trait::async_trait]
pub trait VectorStore: Send + Sync {
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Store without an index behind it: every collection is empty, so
/// classification runs ungrounded.
pub struct NoopVectorStore;

#[async_trait::async_trait]
impl VectorStore for NoopVectorStore {
    async fn search(
        &self,
        _collection: &str,
        _vector: &[f32],
        _limit: usize,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        Ok(Vec::new())
    }
}

pub struct QdrantStore {
    client: QdrantClient,
}

impl QdrantStore {
    pub fn new(client: QdrantClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl VectorStore for QdrantStore {
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        let resp = self.client.search(collection, vector, limit as u64).await?;
        resp.result
            .iter()
            .map(|r| -> Result<SearchHit, ProviderError> {
                Ok(SearchHit {
                    class_id: r.class_id()?,
                    score: r.score,
                })
            })
            .collect()
    }
}
