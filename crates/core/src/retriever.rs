//! Fan-out candidate retrieval across the facet collections.
//!
//! Every collection is searched independently and concurrently; the hits are
//! reduced to their class numbers and unioned. A single failing collection
//! fails the whole retrieval.

use crate::error::{ClassifyError, Result};
use crate::vectorstore::{SearchHit, VectorStore};
use futures::future::try_join_all;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use storage::ClassId;
use tracing::debug;

/// Deduplicated class numbers for one request. Iterates in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateSet(BTreeSet<ClassId>);

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class_id: ClassId) -> bool {
        self.0.insert(class_id)
    }

    pub fn contains(&self, class_id: ClassId) -> bool {
        self.0.contains(&class_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ClassId> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = ClassId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalOptions {
    pub collections: Vec<String>,
    pub limit_per_collection: usize,
}

impl RetrievalOptions {
    pub fn validate(&self) -> Result<()> {
        Self::check(&self.collections, self.limit_per_collection)
    }

    fn check(collections: &[String], limit_per_collection: usize) -> Result<()> {
        if collections.is_empty() {
            return Err(ClassifyError::InvalidInput(
                "at least one collection is required".to_string(),
            ));
        }
        if limit_per_collection == 0 {
            return Err(ClassifyError::InvalidInput(
                "limit per collection must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct CandidateRetriever {
    store: Arc<dyn VectorStore>,
}

impl CandidateRetriever {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    pub async fn retrieve(
        &self,
        vector: &[f32],
        collections: &[String],
        limit_per_collection: usize,
    ) -> Result<CandidateSet> {
        RetrievalOptions::check(collections, limit_per_collection)?;

        let searches = collections
            .iter()
            .map(|collection| self.search_collection(collection, vector, limit_per_collection));
        let per_collection = try_join_all(searches).await?;

        let candidates: CandidateSet = per_collection
            .into_iter()
            .flatten()
            .map(|hit| hit.class_id)
            .collect();
        debug!(candidates = ?candidates, "candidate set");
        Ok(candidates)
    }

    async fn search_collection(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let mut hits = self
            .store
            .search(collection, vector, limit)
            .await
            .map_err(|source| ClassifyError::Retrieval {
                collection: collection.to_string(),
                source,
            })?;
        hits.truncate(limit);
        debug!(collection, hits = hits.len(), "collection searched");
        Ok(hits)
    }
}
