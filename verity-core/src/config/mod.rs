//! Typed configuration, constructed once at startup and passed by reference
//! to each component's constructor. Every field has an explicit default.

pub mod defaults;

mod cache_config;
mod integration_config;
mod knowledge_config;
mod parallelism_config;
mod retrieval_config;

pub use cache_config::CacheConfig;
pub use integration_config::IntegrationConfig;
pub use knowledge_config::KnowledgeConfig;
pub use parallelism_config::ParallelismConfig;
pub use retrieval_config::RetrievalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{VerityError, VerityResult};

/// Full configuration for the Verity retrieval core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerityConfig {
    pub cache: CacheConfig,
    pub retrieval: RetrievalConfig,
    pub knowledge: KnowledgeConfig,
    pub integration: IntegrationConfig,
    pub parallelism: ParallelismConfig,
}

impl VerityConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml_str(s: &str) -> VerityResult<Self> {
        toml::from_str(s).map_err(|e| VerityError::Config {
            reason: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> VerityResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let config = VerityConfig::default();
        assert!((config.retrieval.local_similarity_threshold - 0.6).abs() < f64::EPSILON);
        assert!((config.cache.semantic_threshold - 0.96).abs() < f64::EPSILON);
        assert!((config.retrieval.auto_generated_weight - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.integration.min_confidence, 90);
        assert_eq!(config.integration.min_evidence, 3);
        assert_eq!(config.retrieval.max_results, 3);
        assert_eq!(config.knowledge.version_retention, 3);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = VerityConfig::from_toml_str(
            r#"
            [retrieval]
            local_similarity_threshold = 0.7
            "#,
        )
        .unwrap();
        assert!((config.retrieval.local_similarity_threshold - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.retrieval.max_results, 3);
        assert_eq!(config.cache.ttl_secs, 86_400);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        let err = VerityConfig::from_toml_str("retrieval = 3").unwrap_err();
        assert!(matches!(err, VerityError::Config { .. }));
    }
}
