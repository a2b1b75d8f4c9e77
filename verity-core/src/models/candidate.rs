use serde::{Deserialize, Serialize};

/// Where an evidence candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Local,
    External,
}

/// One evidence candidate considered by the hybrid retriever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    /// Source path (local) or URL (external).
    pub source: String,
    pub provenance: Provenance,
    /// Raw similarity. External hits arrive unscored and carry a neutral
    /// default.
    pub similarity: f64,
    pub is_auto_generated: bool,
    /// Set once the candidate has passed both deduplication phases.
    pub survived_dedup: bool,
}

impl Candidate {
    pub fn local(text: impl Into<String>, source: impl Into<String>, similarity: f64) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            provenance: Provenance::Local,
            similarity,
            is_auto_generated: false,
            survived_dedup: false,
        }
    }

    pub fn external(text: impl Into<String>, source: impl Into<String>, similarity: f64) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            provenance: Provenance::External,
            similarity,
            is_auto_generated: false,
            survived_dedup: false,
        }
    }
}

/// Ordered evidence candidates with provenance. Transient; never persisted.
#[derive(Debug, Clone, Default)]
pub struct RetrievalResult {
    /// Ranked, deduplicated candidates, best first.
    pub candidates: Vec<Candidate>,
    /// Whether the external fallback was attempted. True even when the
    /// external call failed and contributed no candidates; check each
    /// candidate's `provenance` to see what evidence is actually present.
    pub used_external: bool,
}
