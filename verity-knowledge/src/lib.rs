//! # verity-knowledge
//!
//! The knowledge store: immutable, queryable snapshots of embedded
//! documents with double-buffered rebuilds and atomic promotion, a
//! persisted version ledger, the file-backed document source, and the
//! auto-integration scheduler.

pub mod integration;
pub mod ledger;
pub mod snapshot;
pub mod source;
pub mod store;

pub use integration::{IntegrationOutcome, IntegrationScheduler, RejectReason};
pub use ledger::VersionLedger;
pub use snapshot::{ScoredDocument, Snapshot};
pub use source::JsonlDocumentSource;
pub use store::{KnowledgeStore, RebuildState};
