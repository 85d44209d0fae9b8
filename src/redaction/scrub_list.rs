//! Per-call list of terms that must always be redacted

use std::collections::HashSet;

/// Literal terms (and their naive plurals) that override the lexicon
#[derive(Debug, Clone, Default)]
pub struct ScrubList {
    terms: HashSet<String>,
}

impl ScrubList {
    /// Create an empty scrub list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from individual terms
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for term in terms {
            list.add(term.as_ref());
        }
        list
    }

    /// Build from a comma-separated list; empty entries are ignored
    pub fn from_csv(csv: &str) -> Self {
        Self::from_terms(csv.split(',').filter(|t| !t.is_empty()))
    }

    /// Add a term together with its "+s" plural
    ///
    /// Empty terms are ignored; storing one would put a bare "s" on the list.
    pub fn add(&mut self, term: &str) {
        if term.is_empty() {
            return;
        }
        let lowered = term.to_lowercase();
        self.terms.insert(format!("{lowered}s"));
        self.terms.insert(lowered);
    }

    /// Membership test for an already lower-cased word
    pub fn contains_lowered(&self, lowered: &str) -> bool {
        self.terms.contains(lowered)
    }

    /// Number of stored forms (each term contributes two)
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when nothing is scrubbed
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
