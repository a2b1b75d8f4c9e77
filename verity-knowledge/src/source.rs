//! JSONL-backed document source: one document per line.
//!
//! Read in full at rebuild time, appended to by the integration
//! scheduler. Unreadable lines are skipped with a warning rather than
//! failing the whole listing.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use tracing::warn;
use verity_core::errors::{KnowledgeError, VerityResult};
use verity_core::models::Document;
use verity_core::traits::IDocumentSource;

/// File-backed durable store for knowledge text.
#[derive(Debug)]
pub struct JsonlDocumentSource {
    path: PathBuf,
    // Serializes appends so concurrent writers cannot interleave lines.
    append_lock: Mutex<()>,
}

impl JsonlDocumentSource {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl IDocumentSource for JsonlDocumentSource {
    fn list(&self) -> VerityResult<Vec<Document>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(KnowledgeError::SourceFailed {
                    reason: format!("{}: {e}", self.path.display()),
                }
                .into())
            }
        };

        let mut documents = Vec::new();
        for (lineno, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Document>(line) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        line = lineno + 1,
                        error = %e,
                        "skipping unreadable document line"
                    );
                }
            }
        }
        Ok(documents)
    }

    fn append(&self, document: &Document) -> VerityResult<()> {
        let line = serde_json::to_string(document)?;
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonlDocumentSource::new(dir.path().join("docs.jsonl"));
        assert!(source.list().unwrap().is_empty());
    }

    #[test]
    fn append_then_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonlDocumentSource::new(dir.path().join("docs.jsonl"));

        source.append(&Document::new("first", "a.txt")).unwrap();
        source
            .append(&Document::auto_generated("second", "auto"))
            .unwrap();

        let docs = source.list().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "first");
        assert!(!docs[0].is_auto_generated);
        assert!(docs[1].is_auto_generated);
        // Embeddings never persist through the source.
        assert!(docs[0].embedding.is_empty());
    }

    #[test]
    fn unreadable_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.jsonl");
        let source = JsonlDocumentSource::new(path.clone());
        source.append(&Document::new("good", "a.txt")).unwrap();

        let mut raw = fs::read_to_string(&path).unwrap();
        raw.push_str("{ this is not json\n");
        fs::write(&path, raw).unwrap();
        source.append(&Document::new("also good", "b.txt")).unwrap();

        let docs = source.list().unwrap();
        assert_eq!(docs.len(), 2);
    }
}
