//! Free-text PII redaction
//!
//! Structured identifiers are removed by the [`patterns`] pass, then every
//! remaining word is kept only if the [`lexicon`] knows it and the per-call
//! [`scrub_list`] does not name it.

pub mod audit;
pub mod lexicon;
pub mod models;
pub mod patterns;
pub mod scrub_list;
pub mod scrubber;
pub mod tokenizer;

pub use audit::AuditLogger;
pub use lexicon::Lexicon;
pub use models::{Detection, PiiCategory, RedactionOutcome, REDACTED_MARKER};
pub use patterns::PatternLibrary;
pub use scrub_list::ScrubList;
pub use scrubber::{Scrubber, WordClass};
