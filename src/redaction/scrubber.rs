//! Document scrubber
//!
//! Runs the structured pattern pass, then classifies every remaining word
//! against the scrub list and the lexicon. Anything that is not provably a
//! known word is replaced with [`REDACTED_MARKER`].

use crate::redaction::lexicon::Lexicon;
use crate::redaction::models::{Detection, PiiCategory, RedactionOutcome, REDACTED_MARKER};
use crate::redaction::patterns::{PatternLibrary, Segment};
use crate::redaction::scrub_list::ScrubList;
use crate::redaction::tokenizer::{tokenize, Span};

/// How a single word is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// In the lexicon, kept as written
    Known,
    /// On the scrub list, always redacted
    Scrubbed,
    /// Not in the lexicon, redacted
    Unknown,
}

/// Redacts documents against a lexicon, a pattern library and a per-call
/// scrub list
#[derive(Debug)]
pub struct Scrubber<'a> {
    lexicon: &'a Lexicon,
    patterns: &'a PatternLibrary,
    scrub_list: ScrubList,
}

impl<'a> Scrubber<'a> {
    /// Create a scrubber for one call
    pub fn new(lexicon: &'a Lexicon, patterns: &'a PatternLibrary, scrub_list: ScrubList) -> Self {
        Self {
            lexicon,
            patterns,
            scrub_list,
        }
    }

    /// Redact a document
    ///
    /// Markers already present in the input pass through untouched, so
    /// redacting a redacted document changes nothing.
    pub fn redact(&self, document: &str) -> RedactionOutcome {
        let mut detections = Vec::new();

        let segments = self
            .patterns
            .apply(split_existing_markers(document), &mut detections);

        let mut text = String::with_capacity(document.len());
        for segment in segments {
            match segment {
                Segment::Redacted(marker) => text.push_str(marker),
                Segment::Text(part) => self.redact_words(part, &mut text, &mut detections),
            }
        }

        RedactionOutcome {
            text: text.trim().to_string(),
            detections,
        }
    }

    fn redact_words(&self, part: &str, out: &mut String, detections: &mut Vec<Detection>) {
        for span in tokenize(part) {
            match span {
                Span::Separator(separator) => out.push_str(separator),
                Span::Word(word) => match self.classify(word) {
                    WordClass::Known => out.push_str(word),
                    WordClass::Scrubbed => {
                        out.push_str(REDACTED_MARKER);
                        detections.push(Detection::new(PiiCategory::ScrubTerm, word));
                    }
                    WordClass::Unknown => {
                        out.push_str(REDACTED_MARKER);
                        detections.push(Detection::new(PiiCategory::UnknownWord, word));
                    }
                },
            }
        }
    }

    /// Classify a single word
    ///
    /// The scrub list always wins over the lexicon. A hyphenated word that is
    /// not itself known is kept when any of its parts is known, unless one of
    /// its parts is on the scrub list.
    pub fn classify(&self, word: &str) -> WordClass {
        let lowered = word.to_lowercase();

        if self.scrub_list.contains_lowered(&lowered) {
            return WordClass::Scrubbed;
        }
        if self.lexicon.contains_lowered(&lowered) {
            return WordClass::Known;
        }
        if !lowered.contains('-') {
            return WordClass::Unknown;
        }

        let mut parts = lowered.split('-').filter(|p| !p.is_empty());
        if parts.clone().any(|p| self.scrub_list.contains_lowered(p)) {
            WordClass::Scrubbed
        } else if parts.any(|p| self.lexicon.contains_lowered(p)) {
            WordClass::Known
        } else {
            WordClass::Unknown
        }
    }
}

/// Split out literal markers so they are never re-tokenized
fn split_existing_markers(document: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for (start, marker) in document.match_indices(REDACTED_MARKER) {
        if start > last {
            segments.push(Segment::Text(&document[last..start]));
        }
        segments.push(Segment::Redacted(marker));
        last = start + marker.len();
    }
    if last < document.len() {
        segments.push(Segment::Text(&document[last..]));
    }
    segments
}
