use serde::{Deserialize, Serialize};

use crate::errors::VerityResult;

/// One unscored result from the external search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub text: String,
    pub source_url: String,
}

/// External web-search collaborator, consulted when local evidence is
/// insufficient.
pub trait IExternalSearch: Send + Sync {
    fn search(&self, query: &str) -> VerityResult<Vec<SearchHit>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
