use crate::errors::VerityResult;
use crate::models::Verdict;

/// Opaque LLM analysis collaborator: text in, structured verdict out.
///
/// The core never calls this on its own; it is part of the contract the
/// out-of-scope verdict layer presents.
pub trait IAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> VerityResult<Verdict>;
}
