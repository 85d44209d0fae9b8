//! Redaction data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker substituted for everything the scrubber removes
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// What caused a span of text to be redacted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiCategory {
    /// Dates and date-times
    Date,
    /// Telephone numbers
    Phone,
    /// NHS-number-shaped digit groups in free text
    NhsNumber,
    /// Email addresses
    Email,
    /// UK postcodes, with any address run preceding them
    Postcode,
    /// Word supplied in the per-call scrub list
    ScrubTerm,
    /// Word missing from the lexicon
    UnknownWord,
}

impl PiiCategory {
    /// Get human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Phone => "PHONE",
            Self::NhsNumber => "NHS_NUMBER",
            Self::Email => "EMAIL",
            Self::Postcode => "POSTCODE",
            Self::ScrubTerm => "SCRUB_TERM",
            Self::UnknownWord => "UNKNOWN_WORD",
        }
    }

    /// True for categories found by the structured pattern pass
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::ScrubTerm | Self::UnknownWord)
    }
}

/// A single redacted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Category of PII
    pub category: PiiCategory,
    /// Original value (hashed in audit logs)
    pub original_value: String,
}

impl Detection {
    /// Create a new detection
    pub fn new(category: PiiCategory, original_value: impl Into<String>) -> Self {
        Self {
            category,
            original_value: original_value.into(),
        }
    }
}

/// Result of redacting one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionOutcome {
    /// Redacted, trimmed text
    pub text: String,
    /// Everything that was removed, in document order per pass
    pub detections: Vec<Detection>,
}

impl RedactionOutcome {
    /// Get total number of detections
    pub fn total_detections(&self) -> usize {
        self.detections.len()
    }

    /// Check if anything was redacted
    pub fn has_detections(&self) -> bool {
        !self.detections.is_empty()
    }

    /// Count detections per category
    pub fn counts_by_category(&self) -> BTreeMap<PiiCategory, usize> {
        let mut counts = BTreeMap::new();
        for detection in &self.detections {
            *counts.entry(detection.category).or_insert(0) += 1;
        }
        counts
    }
}
