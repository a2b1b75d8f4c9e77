use serde::{Deserialize, Serialize};

use super::defaults;

/// Auto-integration admission gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Minimum verdict confidence (0–100) to admit a document.
    pub min_confidence: u8,
    /// Minimum evidence count to admit a document.
    pub min_evidence: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_MIN_INTEGRATION_CONFIDENCE,
            min_evidence: defaults::DEFAULT_MIN_INTEGRATION_EVIDENCE,
        }
    }
}
