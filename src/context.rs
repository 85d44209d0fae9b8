//! Shared redaction context
//!
//! A [`RedactionContext`] owns everything the text operations need: the
//! lexicon, the pattern library, the static rule sets built from the seed
//! marker lists, and the dynamic rule sets supplied by a [`RuleSource`].
//!
//! The dynamic sets live in an immutable snapshot behind an `RwLock<Arc<_>>`.
//! Readers clone the `Arc` and never observe a half-applied reload; writers
//! build a new snapshot and swap it in.

use crate::domain::text::{is_blank, trim_to_option};
use crate::domain::Result;
use crate::redaction::{Lexicon, PatternLibrary, RedactionOutcome, ScrubList, Scrubber};
use crate::rules::{
    gatekeep_with, strip_with, BoilerplateRule, BoilerplateStripper, DiscardReason,
    DocumentGatekeeper, RuleKind, RuleSource, Verdict, WipeoutRule,
};
use crate::seed::{EmbeddedSeeds, SeedLists, SeedProvider};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

/// Dynamic rules as of one point in time
#[derive(Debug, Clone, Default)]
pub struct DynamicRules {
    boilerplate: BoilerplateStripper,
    wipeout: DocumentGatekeeper,
    boilerplate_loaded: bool,
    wipeout_loaded: bool,
}

impl DynamicRules {
    pub fn boilerplate(&self) -> &BoilerplateStripper {
        &self.boilerplate
    }

    pub fn wipeout(&self) -> &DocumentGatekeeper {
        &self.wipeout
    }

    /// Whether a fetch of `kind` has succeeded
    pub fn is_loaded(&self, kind: RuleKind) -> bool {
        match kind {
            RuleKind::Boilerplate => self.boilerplate_loaded,
            RuleKind::Wipeout => self.wipeout_loaded,
        }
    }

    fn rule_count(&self, kind: RuleKind) -> usize {
        match kind {
            RuleKind::Boilerplate => self.boilerplate.len(),
            RuleKind::Wipeout => self.wipeout.len(),
        }
    }
}

/// Result of [`RedactionContext::ensure_rules_loaded`] or
/// [`RedactionContext::reload_rules`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLoadOutcome {
    /// Rules of this kind were already resident; nothing was fetched
    AlreadyLoaded,
    /// The fetch succeeded
    Loaded {
        kind: RuleKind,
        /// Patterns installed
        accepted: usize,
        /// `pattern: error` for every pattern that failed to compile
        rejected: Vec<String>,
    },
    /// The fetch failed; resident rules are unchanged
    Failed { kind: RuleKind, diagnostic: String },
}

impl RuleLoadOutcome {
    /// Human-readable problem description, if there was one
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::AlreadyLoaded => None,
            Self::Loaded { rejected, .. } if rejected.is_empty() => None,
            Self::Loaded { kind, rejected, .. } => Some(format!(
                "Rejected {} invalid {} pattern(s): {}",
                rejected.len(),
                kind,
                rejected.join("; ")
            )),
            Self::Failed { diagnostic, .. } => Some(diagnostic.clone()),
        }
    }

    /// True unless the fetch failed
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// How fetched rules are installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Install {
    /// Added after the resident rules
    Append,
    /// Replace the resident rules
    Replace,
}

/// Lexicon, patterns and rule sets shared by every text operation
pub struct RedactionContext {
    lexicon: Lexicon,
    patterns: PatternLibrary,
    static_boilerplate: BoilerplateStripper,
    static_wipeout: DocumentGatekeeper,
    dynamic: RwLock<Arc<DynamicRules>>,
    fetch_lock: Mutex<()>,
}

impl RedactionContext {
    /// Build a context from a seed provider
    ///
    /// # Errors
    ///
    /// Fails if the seed lists cannot be loaded or a static pattern does not
    /// compile.
    pub fn new(seeds: &dyn SeedProvider) -> Result<Self> {
        let lists = seeds.load()?;
        tracing::debug!(provider = seeds.name(), "Seed lists loaded");
        Self::from_seed_lists(&lists)
    }

    /// Build a context from the lists compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::new(&EmbeddedSeeds)
    }

    /// Build a context from already-loaded seed lists
    pub fn from_seed_lists(lists: &SeedLists) -> Result<Self> {
        let lexicon = Lexicon::from_seed(lists);
        let patterns = PatternLibrary::new()?;
        let static_boilerplate = BoilerplateStripper::from_patterns(lists.boilerplate_patterns())?;
        let static_wipeout = DocumentGatekeeper::from_patterns(lists.wipeout_patterns())?;

        tracing::info!(
            lexicon_entries = lexicon.len(),
            patterns = patterns.all_patterns().len(),
            static_boilerplate = static_boilerplate.len(),
            static_wipeout = static_wipeout.len(),
            "Redaction context ready"
        );

        Ok(Self {
            lexicon,
            patterns,
            static_boilerplate,
            static_wipeout,
            dynamic: RwLock::new(Arc::new(DynamicRules::default())),
            fetch_lock: Mutex::new(()),
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn patterns(&self) -> &PatternLibrary {
        &self.patterns
    }

    /// Current dynamic rules
    pub fn snapshot(&self) -> Arc<DynamicRules> {
        Arc::clone(&self.dynamic.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn swap(&self, update: impl FnOnce(&mut DynamicRules)) {
        let mut guard = self.dynamic.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = DynamicRules::clone(&guard);
        update(&mut next);
        *guard = Arc::new(next);
    }

    /// A scrubber over this context's lexicon and patterns
    pub fn scrubber(&self, scrub_list: ScrubList) -> Scrubber<'_> {
        Scrubber::new(&self.lexicon, &self.patterns, scrub_list)
    }

    /// Redact a document, always removing `scrub_terms`
    pub fn redact(&self, document: &str, scrub_terms: &[&str]) -> String {
        self.redact_with_detections(document, ScrubList::from_terms(scrub_terms))
            .text
    }

    /// Redact a document and report what was removed
    pub fn redact_with_detections(&self, document: &str, scrub_list: ScrubList) -> RedactionOutcome {
        let outcome = self.scrubber(scrub_list).redact(document);
        tracing::debug!(detections = outcome.total_detections(), "Redaction complete");
        outcome
    }

    /// Remove boilerplate: static rules first, then dynamic rules
    pub fn strip_boilerplate(&self, document: &str) -> String {
        let snapshot = self.snapshot();
        strip_with(
            document,
            self.static_boilerplate
                .rules()
                .iter()
                .chain(snapshot.boilerplate.rules()),
        )
    }

    /// Decide whether a document is kept: static rules first, then dynamic rules
    pub fn gatekeep(&self, document: &str) -> Verdict {
        let snapshot = self.snapshot();
        let verdict = gatekeep_with(
            document,
            self.static_wipeout
                .rules()
                .iter()
                .chain(snapshot.wipeout.rules()),
        );
        if verdict.is_discard() {
            tracing::debug!("Document discarded");
        }
        verdict
    }

    /// Register one extra boilerplate pattern
    ///
    /// # Errors
    ///
    /// An invalid pattern is rejected and nothing changes.
    pub fn add_boilerplate_rule(&self, pattern: &str) -> Result<()> {
        let rule = BoilerplateRule::new(pattern)?;
        self.swap(|rules| rules.boilerplate.push(rule));
        Ok(())
    }

    /// Register one extra wipeout pattern
    ///
    /// # Errors
    ///
    /// An invalid pattern is rejected and nothing changes.
    pub fn add_wipeout_rule(&self, pattern: &str) -> Result<()> {
        let rule = WipeoutRule::new(pattern)?;
        self.swap(|rules| rules.wipeout.push(rule));
        Ok(())
    }

    /// Fetch rules of `kind` unless a previous fetch already succeeded
    ///
    /// Concurrent callers are serialised, so the source is contacted at most
    /// once per successful load.
    pub async fn ensure_rules_loaded(&self, source: &dyn RuleSource, kind: RuleKind) -> RuleLoadOutcome {
        let _fetching = self.fetch_lock.lock().await;
        if self.snapshot().is_loaded(kind) {
            return RuleLoadOutcome::AlreadyLoaded;
        }
        self.fetch_and_install(source, kind, Install::Append).await
    }

    /// Re-fetch rules of `kind` and replace the resident set
    ///
    /// On failure the resident rules stay in place.
    pub async fn reload_rules(&self, source: &dyn RuleSource, kind: RuleKind) -> RuleLoadOutcome {
        let _fetching = self.fetch_lock.lock().await;
        self.fetch_and_install(source, kind, Install::Replace).await
    }

    async fn fetch_and_install(
        &self,
        source: &dyn RuleSource,
        kind: RuleKind,
        install: Install,
    ) -> RuleLoadOutcome {
        let patterns = match source.fetch(kind).await {
            Ok(patterns) => patterns,
            Err(e) => {
                tracing::warn!(source = source.name(), kind = %kind, error = %e, "Rule fetch failed");
                return RuleLoadOutcome::Failed {
                    kind,
                    diagnostic: e.to_string(),
                };
            }
        };

        let (accepted, rejected) = match kind {
            RuleKind::Boilerplate => {
                let (rules, rejected) = compile_all(&patterns, BoilerplateRule::new);
                let accepted = rules.len();
                self.swap(|dynamic| {
                    if install == Install::Replace {
                        dynamic.boilerplate = BoilerplateStripper::new();
                    }
                    rules.into_iter().for_each(|r| dynamic.boilerplate.push(r));
                    dynamic.boilerplate_loaded = true;
                });
                (accepted, rejected)
            }
            RuleKind::Wipeout => {
                let (rules, rejected) = compile_all(&patterns, WipeoutRule::new);
                let accepted = rules.len();
                self.swap(|dynamic| {
                    if install == Install::Replace {
                        dynamic.wipeout = DocumentGatekeeper::new();
                    }
                    rules.into_iter().for_each(|r| dynamic.wipeout.push(r));
                    dynamic.wipeout_loaded = true;
                });
                (accepted, rejected)
            }
        };

        if !rejected.is_empty() {
            tracing::warn!(kind = %kind, rejected = rejected.len(), "Invalid rule patterns skipped");
        }
        tracing::info!(
            source = source.name(),
            kind = %kind,
            accepted,
            resident = self.snapshot().rule_count(kind),
            "Rules loaded"
        );

        RuleLoadOutcome::Loaded {
            kind,
            accepted,
            rejected,
        }
    }
}

/// Outcome of the strip, gatekeep, redact pipeline
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// The stripped document was discarded before redaction
    Discarded(DiscardReason),
    /// The document survived and was redacted
    Redacted(RedactionOutcome),
}

/// Entry points for nullable fields, as handed over by a data warehouse
/// column or a stdin read
///
/// An absent document behaves like an empty one.
impl RedactionContext {
    /// Redact a nullable field with a comma-separated scrub list
    pub fn redact_field(&self, document: Option<&str>, scrub_csv: Option<&str>) -> String {
        if is_blank(document) {
            return String::new();
        }
        let scrub_list = ScrubList::from_csv(scrub_csv.unwrap_or_default());
        self.redact_with_detections(document.unwrap_or_default(), scrub_list)
            .text
    }

    /// Strip boilerplate from a nullable field
    pub fn strip_boilerplate_field(&self, document: Option<&str>) -> String {
        self.strip_boilerplate(document.unwrap_or_default())
    }

    /// Gatekeep a nullable field; `None` means discard
    pub fn gatekeep_field(&self, document: Option<&str>) -> Option<String> {
        let document = trim_to_option(document)?;
        self.gatekeep(&document).into_kept()
    }

    /// Strip boilerplate, gatekeep what is left, then redact it
    pub fn process(&self, document: &str, scrub_list: ScrubList) -> ProcessOutcome {
        let stripped = self.strip_boilerplate(document);
        match self.gatekeep(&stripped) {
            Verdict::Discard(reason) => ProcessOutcome::Discarded(reason),
            Verdict::Keep(kept) => {
                ProcessOutcome::Redacted(self.redact_with_detections(&kept, scrub_list))
            }
        }
    }
}

/// Compile each pattern on its own; failures are collected, not fatal
fn compile_all<T>(patterns: &[String], compile: impl Fn(&str) -> Result<T>) -> (Vec<T>, Vec<String>) {
    let mut rules = Vec::with_capacity(patterns.len());
    let mut rejected = Vec::new();
    for pattern in patterns {
        match compile(pattern) {
            Ok(rule) => rules.push(rule),
            Err(e) => rejected.push(e.to_string()),
        }
    }
    (rules, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SafeguardError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source that counts fetches and can be told to fail
    struct StaticSource {
        boilerplate: Vec<String>,
        wipeout: Vec<String>,
        fail: bool,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn new(boilerplate: &[&str], wipeout: &[&str]) -> Self {
            Self {
                boilerplate: boilerplate.iter().map(|s| s.to_string()).collect(),
                wipeout: wipeout.iter().map(|s| s.to_string()).collect(),
                fail: false,
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(&[], &[])
            }
        }
    }

    #[async_trait]
    impl RuleSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, kind: RuleKind) -> Result<Vec<String>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SafeguardError::RuleSource("service unavailable".to_string()));
            }
            Ok(match kind {
                RuleKind::Boilerplate => self.boilerplate.clone(),
                RuleKind::Wipeout => self.wipeout.clone(),
            })
        }
    }

    fn context() -> RedactionContext {
        RedactionContext::embedded().unwrap()
    }

    #[test]
    fn test_static_boilerplate_markers_apply() {
        assert_eq!(
            context().strip_boilerplate("~BXR Chest :~b normal."),
            "XR Chest : normal."
        );
    }

    #[test]
    fn test_redact_uses_scrub_terms() {
        let ctx = context();
        assert_eq!(
            ctx.redact("the scan was normal", &["scan"]),
            "the [REDACTED] was normal"
        );
    }

    #[test]
    fn test_absent_fields() {
        let ctx = context();
        assert_eq!(ctx.redact_field(None, None), "");
        assert_eq!(ctx.redact_field(None, Some("John")), "");
        assert_eq!(ctx.strip_boilerplate_field(None), "");
        assert_eq!(ctx.gatekeep_field(None), None);
        assert_eq!(
            ctx.redact_field(Some("the scan"), Some(",scan,")),
            "the [REDACTED]"
        );
        assert_eq!(ctx.gatekeep_field(Some(" the scan ")), Some("the scan".to_string()));
    }

    #[test]
    fn test_process_pipeline() {
        let ctx = context();
        ctx.add_wipeout_rule(r"^\p{P}+$").unwrap();

        match ctx.process("~U.~u", ScrubList::new()) {
            ProcessOutcome::Discarded(reason) => {
                assert_eq!(reason, DiscardReason::MatchedRule(r"^\p{P}+$".to_string()))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        match ctx.process("~BXR Chest :~b film 11.3.96.", ScrubList::new()) {
            ProcessOutcome::Redacted(outcome) => {
                assert_eq!(outcome.text, "XR Chest : film [REDACTED].")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_static_marker_is_fatal() {
        let lists = SeedLists {
            boilerplate_markers: "(unclosed\n".to_string(),
            ..SeedLists::default()
        };
        assert!(matches!(
            RedactionContext::from_seed_lists(&lists),
            Err(SafeguardError::Pattern { .. })
        ));
    }

    #[test]
    fn test_add_rules() {
        let ctx = context();
        ctx.add_wipeout_rule(r"\.+").unwrap();
        ctx.add_boilerplate_rule("DRAFT").unwrap();

        assert!(ctx.gatekeep("...").is_discard());
        assert_eq!(ctx.strip_boilerplate("DRAFT report"), "report");
        assert!(ctx.add_wipeout_rule("(").is_err());
        assert_eq!(ctx.snapshot().wipeout().len(), 1);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let ctx = context();
        let before = ctx.snapshot();
        ctx.add_boilerplate_rule("x").unwrap();
        assert!(before.boilerplate().is_empty());
        assert_eq!(ctx.snapshot().boilerplate().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_rules_loaded_fetches_once() {
        let ctx = context();
        let source = StaticSource::new(&[], &[r"\.+", "need to delete"]);

        let first = ctx.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
        assert_eq!(
            first,
            RuleLoadOutcome::Loaded {
                kind: RuleKind::Wipeout,
                accepted: 2,
                rejected: Vec::new()
            }
        );
        assert_eq!(first.diagnostic(), None);

        let second = ctx.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
        assert_eq!(second, RuleLoadOutcome::AlreadyLoaded);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        assert_eq!(
            ctx.gatekeep("Need to delete"),
            Verdict::Discard(DiscardReason::MatchedRule("need to delete".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_patterns_are_rejected_individually() {
        let ctx = context();
        let source = StaticSource::new(&["DRAFT", "(broken", "COPY"], &[]);

        let outcome = ctx.ensure_rules_loaded(&source, RuleKind::Boilerplate).await;
        match &outcome {
            RuleLoadOutcome::Loaded { accepted, rejected, .. } => {
                assert_eq!(*accepted, 2);
                assert_eq!(rejected.len(), 1);
                assert!(rejected[0].contains("(broken"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(outcome.diagnostic().unwrap().contains("Rejected 1"));
        assert_eq!(ctx.strip_boilerplate("DRAFT COPY body"), "body");
    }

    #[tokio::test]
    async fn test_failed_fetch_is_retried() {
        let ctx = context();
        let failing = StaticSource::failing();

        let outcome = ctx.ensure_rules_loaded(&failing, RuleKind::Wipeout).await;
        assert!(!outcome.is_ok());
        assert!(outcome.diagnostic().unwrap().contains("service unavailable"));
        assert!(!ctx.snapshot().is_loaded(RuleKind::Wipeout));

        let working = StaticSource::new(&[], &["x"]);
        let retry = ctx.ensure_rules_loaded(&working, RuleKind::Wipeout).await;
        assert!(matches!(retry, RuleLoadOutcome::Loaded { accepted: 1, .. }));
    }

    #[tokio::test]
    async fn test_reload_replaces_and_keeps_rules_on_failure() {
        let ctx = context();
        ctx.ensure_rules_loaded(&StaticSource::new(&[], &["old"]), RuleKind::Wipeout)
            .await;

        ctx.reload_rules(&StaticSource::new(&[], &["new"]), RuleKind::Wipeout)
            .await;
        assert!(!ctx.gatekeep("old").is_discard());
        assert!(ctx.gatekeep("new").is_discard());

        let failed = ctx
            .reload_rules(&StaticSource::failing(), RuleKind::Wipeout)
            .await;
        assert!(!failed.is_ok());
        assert!(ctx.gatekeep("new").is_discard());
        assert!(ctx.snapshot().is_loaded(RuleKind::Wipeout));
    }

    #[tokio::test]
    async fn test_kinds_load_independently() {
        let ctx = context();
        let source = StaticSource::new(&["DRAFT"], &["x"]);

        ctx.ensure_rules_loaded(&source, RuleKind::Boilerplate).await;
        assert!(ctx.snapshot().is_loaded(RuleKind::Boilerplate));
        assert!(!ctx.snapshot().is_loaded(RuleKind::Wipeout));
    }
}
