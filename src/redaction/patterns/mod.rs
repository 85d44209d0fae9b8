//! Pattern library for structured PII
//!
//! Structured identifiers (dates, phone numbers, NHS-number-shaped digit
//! groups, email addresses and postcodes) are matched against the whole
//! document before it is tokenized. Each match becomes a single
//! `" [REDACTED]"` segment that the tokenizer never sees.

pub mod grammar;

use crate::domain::{Result, SafeguardError};
use crate::redaction::models::{Detection, PiiCategory};
use regex::Regex;

/// Replacement for a structured match (note the leading space)
pub const PATTERN_REPLACEMENT: &str = " [REDACTED]";

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Compiled regex
    pub regex: Regex,
    /// PII category
    pub category: PiiCategory,
}

/// Piece of a document after the pattern pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Original text still to be tokenized
    Text(&'a str),
    /// Redaction marker, emitted verbatim
    Redacted(&'a str),
}

/// Fixed, ordered set of structured PII matchers
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<CompiledPattern>,
}

impl PatternLibrary {
    /// Build the built-in library
    ///
    /// Order matters: dates run first so their digit groups are gone before
    /// the phone and NHS number patterns look at the text.
    pub fn new() -> Result<Self> {
        let date_time = grammar::date_time();
        let postcode = grammar::postcode();
        let [nhs_3_3_4, nhs_3_4_3] = grammar::nhs_number_like();

        Self::from_sources([
            (PiiCategory::Date, date_time.as_str()),
            (PiiCategory::Phone, grammar::phone()),
            (PiiCategory::NhsNumber, nhs_3_3_4),
            (PiiCategory::NhsNumber, nhs_3_4_3),
            (PiiCategory::Email, grammar::email()),
            (PiiCategory::Postcode, postcode.as_str()),
        ])
    }

    /// Build a library from `(category, regex)` pairs, applied in the given order
    pub fn from_sources<'s>(
        sources: impl IntoIterator<Item = (PiiCategory, &'s str)>,
    ) -> Result<Self> {
        let patterns = sources
            .into_iter()
            .map(|(category, source)| {
                Regex::new(source)
                    .map(|regex| CompiledPattern { regex, category })
                    .map_err(|e| SafeguardError::pattern(source, &e))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(patterns = patterns.len(), "Pattern library compiled");
        Ok(Self { patterns })
    }

    /// Get all patterns
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Get patterns for a specific category
    pub fn patterns_for_category(
        &self,
        category: PiiCategory,
    ) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter().filter(move |p| p.category == category)
    }

    /// Run every pattern, in order, over the text segments
    ///
    /// A pattern only ever sees text left over by the patterns before it;
    /// redacted segments are never rescanned.
    pub fn apply<'a>(
        &self,
        segments: Vec<Segment<'a>>,
        detections: &mut Vec<Detection>,
    ) -> Vec<Segment<'a>> {
        self.patterns.iter().fold(segments, |segments, pattern| {
            let mut next = Vec::with_capacity(segments.len());
            for segment in segments {
                match segment {
                    Segment::Text(text) => split_matches(pattern, text, &mut next, detections),
                    redacted @ Segment::Redacted(_) => next.push(redacted),
                }
            }
            next
        })
    }
}

fn split_matches<'a>(
    pattern: &CompiledPattern,
    text: &'a str,
    out: &mut Vec<Segment<'a>>,
    detections: &mut Vec<Detection>,
) {
    let mut last = 0;
    for matched in pattern.regex.find_iter(text) {
        if matched.as_str().is_empty() {
            continue;
        }
        if matched.start() > last {
            out.push(Segment::Text(&text[last..matched.start()]));
        }
        out.push(Segment::Redacted(PATTERN_REPLACEMENT));
        detections.push(Detection::new(pattern.category, matched.as_str().trim()));
        last = matched.end();
    }
    if last < text.len() {
        out.push(Segment::Text(&text[last..]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PatternLibrary {
        PatternLibrary::new().unwrap()
    }

    fn first_category(text: &str) -> Option<PiiCategory> {
        let mut detections = Vec::new();
        library().apply(vec![Segment::Text(text)], &mut detections);
        detections.first().map(|d| d.category)
    }

    #[test]
    fn test_builtin_patterns_compile() {
        let library = library();
        assert_eq!(library.all_patterns().len(), 6);
        assert_eq!(library.patterns_for_category(PiiCategory::NhsNumber).count(), 2);
    }

    #[test]
    fn test_date_patterns() {
        for text in [
            "29-Mar-2020",
            "11.3.96",
            "11th May 1999",
            "December 1994",
            "DEC 2001",
            "15/12/2015",
            "Mon 03/04/2019 14:30",
            "Mar 3rd  12:00 2020",
            "03/2020 review",
        ] {
            assert_eq!(first_category(text), Some(PiiCategory::Date), "{text}");
        }
    }

    #[test]
    fn test_phone_patterns() {
        assert_eq!(first_category("Tel. 01234 456789"), Some(PiiCategory::Phone));
        assert_eq!(first_category("call +441865741166"), Some(PiiCategory::Phone));
    }

    #[test]
    fn test_nhs_like_patterns() {
        assert_eq!(first_category("1234567891"), Some(PiiCategory::NhsNumber));
        assert_eq!(first_category("123 456 7891"), Some(PiiCategory::NhsNumber));
        assert_eq!(first_category("123 4567 891"), Some(PiiCategory::NhsNumber));
    }

    #[test]
    fn test_email_patterns() {
        assert_eq!(first_category("contact jo@example.nhs.uk"), Some(PiiCategory::Email));
        assert_eq!(first_category("\"jo.bloggs\"@example.com"), Some(PiiCategory::Email));
        assert_eq!(first_category("jo@[192.168.0.1]"), Some(PiiCategory::Email));
    }

    #[test]
    fn test_postcode_patterns() {
        assert_eq!(first_category("OX3 9DU"), Some(PiiCategory::Postcode));
        assert_eq!(first_category("GIR 0AA"), Some(PiiCategory::Postcode));
    }

    #[test]
    fn test_postcode_consumes_address_run() {
        let mut detections = Vec::new();
        let segments = library().apply(
            vec![Segment::Text("Seen today. 77 Broadway Ave., Oxford, OX12 9GE")],
            &mut detections,
        );

        assert_eq!(
            segments,
            vec![Segment::Text("Seen today."), Segment::Redacted(PATTERN_REPLACEMENT)]
        );
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].category, PiiCategory::Postcode);
        assert_eq!(detections[0].original_value, "77 Broadway Ave., Oxford, OX12 9GE");
    }

    #[test]
    fn test_clinical_text_is_untouched() {
        for text in [
            "the stenosis appears 35-40%.",
            "The heart is enlarged (CTR 13/56).",
            "AP Spine (L1-L4)",
            "Approximately 1.1cm from the origin",
        ] {
            assert_eq!(first_category(text), None, "{text}");
        }
    }

    #[test]
    fn test_redacted_segments_are_not_rescanned() {
        let mut detections = Vec::new();
        let segments = library().apply(
            vec![Segment::Redacted("[REDACTED]"), Segment::Text(" on 11.3.96.")],
            &mut detections,
        );

        assert_eq!(
            segments,
            vec![
                Segment::Redacted("[REDACTED]"),
                Segment::Text(" on"),
                Segment::Redacted(PATTERN_REPLACEMENT),
                Segment::Text("."),
            ]
        );
        assert_eq!(detections[0].original_value, "11.3.96");
    }

    #[test]
    fn test_invalid_source_is_a_pattern_error() {
        let result = PatternLibrary::from_sources([(PiiCategory::Date, "([0-9]")]);
        assert!(matches!(result, Err(SafeguardError::Pattern { .. })));
    }
}
