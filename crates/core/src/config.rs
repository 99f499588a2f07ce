use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reference: ReferenceConfig,
    pub embeddings: EmbeddingConfig,
    pub vectors: VectorConfig,
    pub decision: DecisionConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub path: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: "data/output.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-large".to_string(),
            dimension: 3072,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    pub provider: String,
    /// Falls back to `QDRANT_CLUSTER` when unset.
    pub url: Option<String>,
    pub collections: Vec<String>,
    pub limit_per_collection: usize,
    pub hnsw_ef: u64,
    pub exact: bool,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            provider: "qdrant".to_string(),
            url: None,
            collections: ["introduction", "heading", "include", "exclude"]
                .into_iter()
                .map(String::from)
                .collect(),
            limit_per_collection: 2,
            hnsw_ef: 128,
            exact: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    pub provider: String,
    pub model: String,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.vectors.collections.is_empty(),
            "vectors.collections must name at least one collection"
        );
        anyhow::ensure!(
            self.vectors.collections.iter().all(|c| !c.trim().is_empty()),
            "vectors.collections contains an empty name"
        );
        anyhow::ensure!(
            self.vectors.limit_per_collection >= 1,
            "vectors.limit_per_collection must be at least 1"
        );
        anyhow::ensure!(
            self.embeddings.dimension >= 1,
            "embeddings.dimension must be at least 1"
        );
        anyhow::ensure!(self.http.timeout_secs >= 1, "http.timeout_secs must be at least 1");
        Ok(())
    }
}

/// Layers an optional TOML file and `NICE__`-prefixed environment variables over the defaults.
pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    settings = settings.add_source(
        config::Environment::with_prefix("NICE")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("vectors.collections"),
    );
    let cfg: AppConfig = settings.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_published_index() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.vectors.collections,
            vec!["introduction", "heading", "include", "exclude"]
        );
        assert_eq!(cfg.vectors.limit_per_collection, 2);
        assert_eq!(cfg.embeddings.model, "text-embedding-3-large");
        assert_eq!(cfg.embeddings.dimension, 3072);
        assert_eq!(cfg.decision.model, "gpt-4o");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nice.toml");
        std::fs::write(
            &path,
            r#"
            [reference]
            path = "/srv/ncl/output.json"

            [vectors]
            collections = ["heading", "include"]
            limit_per_collection = 5
            exact = true
            "#,
        )
        .unwrap();

        let cfg = load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(cfg.reference.path, "/srv/ncl/output.json");
        assert_eq!(cfg.vectors.collections, vec!["heading", "include"]);
        assert_eq!(cfg.vectors.limit_per_collection, 5);
        assert!(cfg.vectors.exact);
        // untouched sections keep their defaults
        assert_eq!(cfg.vectors.hnsw_ef, 128);
        assert_eq!(cfg.decision.provider, "openai");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[vectors]\nlimit_per_collection = 0\n").unwrap();
        assert!(load(Some(path.to_str().unwrap())).is_err());

        let mut cfg = AppConfig::default();
        cfg.vectors.collections.clear();
        assert!(cfg.validate().is_err());
    }
}
