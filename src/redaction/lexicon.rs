//! Vocabulary of words that are safe to keep
//!
//! The lexicon is the union of the seed word lists (general English, medical
//! terms, medical acronyms and local additions). Entries are lower-cased and
//! sorted once at construction so membership is a binary search.

use crate::seed::SeedLists;

/// Immutable, sorted, case-folded vocabulary
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: Vec<String>,
}

impl Lexicon {
    /// Merge the four seed lists into a lexicon
    pub fn from_seed(seed: &SeedLists) -> Self {
        Self::from_word_lists([
            seed.words.as_str(),
            seed.medical_terms.as_str(),
            seed.medical_acronyms.as_str(),
            seed.custom_dictionary.as_str(),
        ])
    }

    /// Build from newline-separated word lists
    pub fn from_word_lists<'a>(lists: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_words(lists.into_iter().flat_map(str::lines))
    }

    /// Build from individual words; blank entries are skipped
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        words.sort_unstable();
        words.dedup();

        tracing::debug!(entries = words.len(), "Lexicon built");
        Self { words }
    }

    /// Case-insensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        self.contains_lowered(&word.to_lowercase())
    }

    /// Membership test for a word the caller has already lower-cased
    pub(crate) fn contains_lowered(&self, lowered: &str) -> bool {
        self.words
            .binary_search_by(|word| word.as_str().cmp(lowered))
            .is_ok()
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
