//! End-to-end flow through the wired service: bootstrap, miss, retrieve,
//! record, auto-integration, and version-change invalidation.

use std::fs;
use std::io::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

use verity_cache::HitKind;
use verity_core::config::VerityConfig;
use verity_core::errors::VerityResult;
use verity_core::models::{Document, Provenance, Verdict, VerdictClass};
use verity_core::traits::{IEmbeddingProvider, IExternalSearch, SearchHit};
use verity_engine::{Service, ServicePaths};
use verity_knowledge::IntegrationOutcome;

/// Maps every text to the same unit vector, so every stored document is a
/// perfect match for every query.
struct ConstantEmbedder;

impl IEmbeddingProvider for ConstantEmbedder {
    fn embed(&self, _text: &str) -> VerityResult<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "constant"
    }
}

struct NoExternal;

impl IExternalSearch for NoExternal {
    fn search(&self, _query: &str) -> VerityResult<Vec<SearchHit>> {
        panic!("external search must not be consulted when local evidence is strong");
    }

    fn name(&self) -> &str {
        "none"
    }
}

fn seed_source(path: &std::path::Path, texts: &[&str]) {
    let mut file = fs::File::create(path).unwrap();
    for text in texts {
        let doc = Document::new(*text, "seed.txt");
        writeln!(file, "{}", serde_json::to_string(&doc).unwrap()).unwrap();
    }
}

fn service(dir: &tempfile::TempDir) -> Service {
    let paths = ServicePaths {
        document_source: dir.path().join("knowledge.jsonl"),
        version_ledger: dir.path().join("versions.json"),
    };
    seed_source(
        &paths.document_source,
        &[
            "water boils at one hundred degrees celsius at sea level",
            "the pacific is the largest ocean on earth",
        ],
    );
    Service::new(
        VerityConfig::default(),
        paths,
        Arc::new(ConstantEmbedder),
        Arc::new(NoExternal),
    )
}

fn wait_for_doc_count(service: &Service, expected: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while service.store().doc_count() != expected {
        assert!(
            Instant::now() < deadline,
            "store never reached {expected} documents"
        );
        std::thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn bootstrap_then_retrieve_locally() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);

    assert_eq!(svc.store().doc_count(), 0);
    let version = svc.bootstrap().unwrap();
    assert!(version.id.starts_with("v_"));
    assert_eq!(svc.store().doc_count(), 2);

    let (cached, kind) = svc.lookup("does water boil at 100c");
    assert!(cached.is_none());
    assert_eq!(kind, HitKind::Miss);

    let result = svc.retrieve_evidence("does water boil at 100c");
    assert!(!result.used_external);
    assert!(!result.candidates.is_empty());
    assert!(result
        .candidates
        .iter()
        .all(|c| c.provenance == Provenance::Local));
}

#[test]
fn recorded_verdict_is_served_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    svc.bootstrap().unwrap();

    // Disputed verdicts fail the admission gate, so no background rebuild
    // bumps the version out from under the cache entry.
    let verdict = Verdict {
        class: VerdictClass::Disputed,
        confidence: 95,
        summary: "sources disagree".into(),
        evidence: vec!["a".into(), "b".into(), "c".into()],
    };
    let outcome = svc.record_verdict("is pluto a planet", &verdict).unwrap();
    assert!(matches!(outcome, IntegrationOutcome::Rejected(_)));

    let (cached, kind) = svc.lookup("is pluto a planet");
    assert_eq!(kind, HitKind::Exact);
    assert_eq!(cached.unwrap().class, VerdictClass::Disputed);
}

#[test]
fn admitted_verdict_rebuilds_and_invalidates_cache() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service(&dir);
    svc.bootstrap().unwrap();

    let verdict = Verdict {
        class: VerdictClass::True,
        confidence: 96,
        summary: "confirmed by three independent sources".into(),
        evidence: vec!["a".into(), "b".into(), "c".into()],
    };
    let outcome = svc.record_verdict("is the sky blue", &verdict).unwrap();
    assert!(matches!(outcome, IntegrationOutcome::Scheduled));

    // The background rebuild folds the auto-generated document in.
    wait_for_doc_count(&svc, 3);

    // The cached entry was bound to the pre-rebuild version. The read
    // evicts the exact entry; the sweep collects its semantic shadow.
    let (cached, kind) = svc.lookup("is the sky blue");
    assert!(cached.is_none());
    assert_eq!(kind, HitKind::Miss);
    assert_eq!(svc.sweep_cache(), 1);
}
