//! Query normalization and keying shared by the cache and retrieval crates.

/// Normalize a query for exact-match keying: trim and lowercase.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Deterministic key for a query: blake3 of the normalized text.
pub fn query_hash(query: &str) -> String {
    blake3::hash(normalize(query).as_bytes()).to_hex().to_string()
}

/// Collapse runs of whitespace to single spaces. Used to build dedup
/// signatures that ignore formatting differences.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `n` characters of a string (char-aware, not bytes).
pub fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Cosine similarity of two vectors. Returns 0.0 for mismatched or empty
/// inputs rather than erroring; callers treat that as "no match".
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
