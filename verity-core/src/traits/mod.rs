//! Collaborator contracts the core consumes. Implementations live outside
//! this workspace (LLM, embedding model, web search); tests supply fakes.

mod analyzer;
mod embedding;
mod search;
mod source;
mod version_probe;

pub use analyzer::IAnalyzer;
pub use embedding::IEmbeddingProvider;
pub use search::{IExternalSearch, SearchHit};
pub use source::IDocumentSource;
pub use version_probe::IVersionProbe;
