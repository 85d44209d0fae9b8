//! Boilerplate stripping

use crate::domain::{Result, SafeguardError};
use regex::Regex;

/// A compiled boilerplate pattern
#[derive(Debug, Clone)]
pub struct BoilerplateRule {
    regex: Regex,
}

impl BoilerplateRule {
    /// Compile a rule; the pattern is used exactly as given
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| SafeguardError::pattern(pattern, &e))?;
        Ok(Self { regex })
    }

    /// Source pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn erase(&self, text: &str) -> String {
        self.regex.replace_all(text, "").into_owned()
    }
}

/// Trim, erase every match of every rule in order, trim again
pub fn strip_with<'r>(document: &str, rules: impl IntoIterator<Item = &'r BoilerplateRule>) -> String {
    let stripped = rules
        .into_iter()
        .fold(document.trim().to_string(), |text, rule| rule.erase(&text));
    stripped.trim().to_string()
}

/// Ordered set of boilerplate rules
#[derive(Debug, Clone, Default)]
pub struct BoilerplateStripper {
    rules: Vec<BoilerplateRule>,
}

impl BoilerplateStripper {
    /// Create an empty stripper
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every pattern; the first invalid one is an error
    pub fn from_patterns<'p>(patterns: impl IntoIterator<Item = &'p str>) -> Result<Self> {
        let rules = patterns
            .into_iter()
            .map(BoilerplateRule::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Append a compiled rule
    pub fn push(&mut self, rule: BoilerplateRule) {
        self.rules.push(rule);
    }

    /// Rules in application order
    pub fn rules(&self) -> &[BoilerplateRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Strip this stripper's rules from `document`
    pub fn strip(&self, document: &str) -> String {
        strip_with(document, &self.rules)
    }
}
