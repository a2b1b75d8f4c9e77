use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One indexed unit of knowledge.
///
/// Owned exclusively by the snapshot that contains it; never mutated after
/// being embedded. Updates create a new `Document` in a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    /// Embedding vector, empty until the document has been embedded during
    /// a rebuild. Not persisted in the document source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
    /// Where the text came from (file path, URL, or synthetic marker).
    pub source_path: String,
    /// True for knowledge the system generated from a prior high-confidence
    /// verdict. Discounted in similarity scoring.
    #[serde(default)]
    pub is_auto_generated: bool,
}

impl Document {
    /// A new, not-yet-embedded document.
    pub fn new(text: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            embedding: Vec::new(),
            source_path: source_path.into(),
            is_auto_generated: false,
        }
    }

    /// A new auto-generated document.
    pub fn auto_generated(text: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            is_auto_generated: true,
            ..Self::new(text, source_path)
        }
    }

    /// The same document with an embedding attached.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }
}
