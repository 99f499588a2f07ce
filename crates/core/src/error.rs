use providers::ProviderError;
use storage::{ClassId, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("reference data unavailable: {0}")]
    DataLoad(#[source] StoreError),
    #[error("class {0} not found in reference store")]
    NotFound(ClassId),
    #[error("embedding service failed: {0}")]
    EmbeddingService(#[source] ProviderError),
    #[error("retrieval from collection {collection:?} failed: {source}")]
    Retrieval {
        collection: String,
        #[source]
        source: ProviderError,
    },
    #[error("decision service failed: {0}")]
    DecisionService(#[source] ProviderError),
}

impl From<StoreError> for ClassifyError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ClassifyError::NotFound(id),
            other => ClassifyError::DataLoad(other),
        }
    }
}

impl ClassifyError {
    pub fn gateway(&self) -> Option<&'static str> {
        match self {
            ClassifyError::EmbeddingService(_) => Some("embedding"),
            ClassifyError::Retrieval { .. } => Some("retrieval"),
            ClassifyError::DecisionService(_) => Some("decision"),
            _ => None,
        }
    }
}

pub type Result<T, E = ClassifyError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_split_into_not_found_and_data_load() {
        assert!(matches!(
            ClassifyError::from(StoreError::NotFound(3)),
            ClassifyError::NotFound(3)
        ));
        assert!(matches!(
            ClassifyError::from(StoreError::DuplicateClass(3)),
            ClassifyError::DataLoad(_)
        ));
    }

    #[test]
    fn gateway_errors_name_their_gateway() {
        let e = ClassifyError::Retrieval {
            collection: "heading".into(),
            source: ProviderError::RequestFailed("connection reset".into()),
        };
        assert_eq!(e.gateway(), Some("retrieval"));
        assert!(e.to_string().contains("heading"));
        assert_eq!(ClassifyError::InvalidInput("x".into()).gateway(), None);
    }
}
