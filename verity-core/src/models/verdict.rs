use serde::{Deserialize, Serialize};

/// Outcome class of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictClass {
    True,
    False,
    Disputed,
    Insufficient,
}

impl VerdictClass {
    /// Only conclusive verdicts may feed knowledge back into the store.
    pub fn is_conclusive(self) -> bool {
        matches!(self, Self::True | Self::False)
    }
}

/// Structured verdict produced by the (out-of-scope) analysis collaborator.
///
/// The cache stores this as an opaque payload; the integration scheduler
/// reads only `class` and `confidence` for its admission gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub class: VerdictClass,
    /// 0–100.
    pub confidence: u8,
    pub summary: String,
    /// Evidence references (source paths or URLs).
    pub evidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conclusive_classes() {
        assert!(VerdictClass::True.is_conclusive());
        assert!(VerdictClass::False.is_conclusive());
        assert!(!VerdictClass::Disputed.is_conclusive());
        assert!(!VerdictClass::Insufficient.is_conclusive());
    }
}
