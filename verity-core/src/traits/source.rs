use crate::errors::VerityResult;
use crate::models::Document;

/// Durable backing store for knowledge text.
///
/// Read in full at rebuild time; appended to by the integration scheduler.
pub trait IDocumentSource: Send + Sync {
    fn list(&self) -> VerityResult<Vec<Document>>;

    fn append(&self, document: &Document) -> VerityResult<()>;
}
