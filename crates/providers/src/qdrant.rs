use crate::{check_status, ProviderError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CLASS_ID_FIELD: &str = "class_id";

#[derive(Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub hnsw_ef: u64,
    pub exact: bool,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct QdrantClient {
    client: Client,
    cfg: QdrantConfig,
}

impl QdrantClient {
    pub fn new(mut cfg: QdrantConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(cfg.timeout).build()?;
        cfg.url = cfg.url.trim_end_matches('/').to_string();
        Ok(Self { client, cfg })
    }

    pub async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: u64,
    ) -> Result<QdrantSearchResponse, ProviderError> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.cfg.url,
            collection_segment(collection)?
        );
        let body = SearchRequest {
            vector,
            limit,
            with_payload: true,
            params: SearchParams {
                hnsw_ef: self.cfg.hnsw_ef,
                exact: self.cfg.exact,
            },
        };
        let mut builder = self.client.post(url).json(&body);
        if let Some(key) = &self.cfg.api_key {
            builder = builder.header("api-key", key);
        }
        let resp = builder.send().await?;
        let resp = check_status(resp).await?;
        let parsed: QdrantSearchResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        Ok(parsed)
    }
}

// Collection names are spliced into the request path.
fn collection_segment(name: &str) -> Result<&str, ProviderError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.');
    if name.is_empty() || name == "." || name == ".." || !name.chars().all(allowed) {
        return Err(ProviderError::InvalidCollection(name.to_string()));
    }
    Ok(name)
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: u64,
    with_payload: bool,
    params: SearchParams,
}

#[derive(Debug, Serialize)]
struct SearchParams {
    hnsw_ef: u64,
    exact: bool,
}

#[derive(Debug, Deserialize)]
pub struct QdrantSearchResponse {
    pub result: Vec<SearchResult>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResult {
    pub id: serde_json::Value,
    pub score: f32,
    pub payload: Option<serde_json::Value>,
}

impl SearchResult {
    /// Category number from the point payload. Accepts integers and integer strings.
    pub fn class_id(&self) -> Result<u32, ProviderError> {
        let value = self
            .payload
            .as_ref()
            .and_then(|p| p.get(CLASS_ID_FIELD))
            .ok_or_else(|| {
                ProviderError::InvalidResponse(format!("point {} has no {}", self.id, CLASS_ID_FIELD))
            })?;
        let parsed = match value {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "point {} has non-integer {}: {}",
                self.id, CLASS_ID_FIELD, value
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(payload: serde_json::Value) -> SearchResult {
        SearchResult {
            id: serde_json::json!(3),
            score: 0.8,
            payload: Some(payload),
        }
    }

    #[test]
    fn class_id_accepts_numbers_and_numeric_strings() {
        assert_eq!(result(serde_json::json!({"class_id": 9})).class_id().unwrap(), 9);
        assert_eq!(result(serde_json::json!({"class_id": "35"})).class_id().unwrap(), 35);
    }

    #[test]
    fn class_id_rejects_missing_or_bad_payload() {
        assert!(result(serde_json::json!({"other": 1})).class_id().is_err());
        assert!(result(serde_json::json!({"class_id": "nine"})).class_id().is_err());
        assert!(result(serde_json::json!({"class_id": -4})).class_id().is_err());
        let bare = SearchResult {
            id: serde_json::json!("a"),
            score: 0.1,
            payload: None,
        };
        assert!(bare.class_id().is_err());
    }

    #[test]
    fn search_response_parses_qdrant_shape() {
        let raw = r#"{"result":[{"id":12,"version":0,"score":0.91,"payload":{"class_id":7}}],"status":"ok","time":0.002}"#;
        let parsed: QdrantSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.result.len(), 1);
        assert_eq!(parsed.result[0].class_id().unwrap(), 7);
    }

    #[test]
    fn collection_names_cannot_escape_the_path() {
        for ok in ["introduction", "nice_v2", "heading-2024", "facet.include"] {
            assert_eq!(collection_segment(ok).unwrap(), ok);
        }
        for bad in ["", ".", "..", "a/b", "../x", "heading?limit=9", "in clude", "%2e%2e"] {
            assert!(
                matches!(collection_segment(bad), Err(ProviderError::InvalidCollection(_))),
                "{bad}"
            );
        }
    }

    #[tokio::test]
    async fn bad_collection_fails_before_any_request() {
        let client = QdrantClient::new(QdrantConfig {
            url: "http://127.0.0.1:9".into(),
            api_key: None,
            hnsw_ef: 128,
            exact: false,
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        let err = client.search("../x", &[0.1], 2).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidCollection(_)));
    }

    #[test]
    fn search_request_carries_hnsw_params() {
        let body = SearchRequest {
            vector: &[0.5, 0.25],
            limit: 2,
            with_payload: true,
            params: SearchParams {
                hnsw_ef: 128,
                exact: false,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["params"]["hnsw_ef"], 128);
        assert_eq!(json["params"]["exact"], false);
        assert_eq!(json["limit"], 2);
    }
}
