//! Whole-document wipeout

use crate::domain::{Result, SafeguardError};
use regex::{Regex, RegexBuilder};

/// A compiled wipeout pattern
///
/// Rules always match the whole (trimmed) document, case-insensitively.
#[derive(Debug, Clone)]
pub struct WipeoutRule {
    source: String,
    regex: Regex,
}

impl WipeoutRule {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()
            .map_err(|e| SafeguardError::pattern(pattern, &e))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Pattern as registered, before anchoring
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, document: &str) -> bool {
        self.regex.is_match(document)
    }
}

/// Why a document was discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    /// Nothing left after trimming
    Empty,
    /// A wipeout rule matched; holds the rule's pattern
    MatchedRule(String),
}

/// Outcome of gatekeeping a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The trimmed document
    Keep(String),
    Discard(DiscardReason),
}

impl Verdict {
    pub fn is_discard(&self) -> bool {
        matches!(self, Verdict::Discard(_))
    }

    /// Kept text, or `None` for a discard
    pub fn into_kept(self) -> Option<String> {
        match self {
            Verdict::Keep(text) => Some(text),
            Verdict::Discard(_) => None,
        }
    }
}

/// Trim, then discard if empty or if any rule matches
pub fn gatekeep_with<'r>(document: &str, rules: impl IntoIterator<Item = &'r WipeoutRule>) -> Verdict {
    let trimmed = document.trim();
    if trimmed.is_empty() {
        return Verdict::Discard(DiscardReason::Empty);
    }

    match rules.into_iter().find(|rule| rule.matches(trimmed)) {
        Some(rule) => Verdict::Discard(DiscardReason::MatchedRule(rule.as_str().to_string())),
        None => Verdict::Keep(trimmed.to_string()),
    }
}

/// Ordered set of wipeout rules
#[derive(Debug, Clone, Default)]
pub struct DocumentGatekeeper {
    rules: Vec<WipeoutRule>,
}

impl DocumentGatekeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every pattern; the first invalid one is an error
    pub fn from_patterns<'p>(patterns: impl IntoIterator<Item = &'p str>) -> Result<Self> {
        let rules = patterns
            .into_iter()
            .map(WipeoutRule::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: WipeoutRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[WipeoutRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Gatekeep `document` against this gatekeeper's rules
    pub fn gatekeep(&self, document: &str) -> Verdict {
        gatekeep_with(document, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn gatekeeper() -> DocumentGatekeeper {
        DocumentGatekeeper::from_patterns([r"\.+", r"^CT\s\w+\s:\s*\n*.?$", "need to delete"])
            .unwrap()
    }

    #[test_case("" ; "empty")]
    #[test_case("   \n\t" ; "whitespace")]
    fn test_blank_documents_are_discarded(document: &str) {
        assert_eq!(
            DocumentGatekeeper::new().gatekeep(document),
            Verdict::Discard(DiscardReason::Empty)
        );
    }

    #[test_case("." ; "single period")]
    #[test_case(".........." ; "period run")]
    #[test_case("CT Chest :" ; "bare heading")]
    #[test_case("CT Head : ." ; "heading with period")]
    #[test_case("CT Chest : 1" ; "heading with digit")]
    #[test_case("Need to DELETE" ; "case insensitive")]
    fn test_matching_documents_are_discarded(document: &str) {
        assert!(gatekeeper().gatekeep(document).is_discard());
    }

    #[test]
    fn test_rules_match_whole_document() {
        let verdict = gatekeeper().gatekeep("  We need to delete this line later.  ");
        assert_eq!(
            verdict,
            Verdict::Keep("We need to delete this line later.".to_string())
        );
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let gatekeeper = DocumentGatekeeper::from_patterns(["as above|as below"]).unwrap();
        assert!(gatekeeper.gatekeep("As below").is_discard());
        assert!(!gatekeeper.gatekeep("As below the knee").is_discard());
    }

    #[test]
    fn test_discard_names_the_rule() {
        assert_eq!(
            gatekeeper().gatekeep("..."),
            Verdict::Discard(DiscardReason::MatchedRule(r"\.+".to_string()))
        );
    }

    #[test]
    fn test_into_kept() {
        assert_eq!(Verdict::Keep("x".to_string()).into_kept(), Some("x".to_string()));
        assert_eq!(Verdict::Discard(DiscardReason::Empty).into_kept(), None);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            WipeoutRule::new("[unclosed"),
            Err(SafeguardError::Pattern { .. })
        ));
    }
}
