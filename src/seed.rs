//! Seed data
//!
//! The lexicon and the static boilerplate/wipeout markers are built from six
//! newline-separated lists. [`EmbeddedSeeds`] ships the lists inside the
//! binary; [`DirectorySeeds`] reads the same files from disk so a deployment
//! can grow the vocabulary without rebuilding.

use crate::domain::{Result, SafeguardError};
use std::path::{Path, PathBuf};

/// File names shared by both providers
pub const WORDS_FILE: &str = "words.txt";
pub const MEDICAL_TERMS_FILE: &str = "medical_terms.txt";
pub const MEDICAL_ACRONYMS_FILE: &str = "medical_acronyms.txt";
pub const CUSTOM_DICTIONARY_FILE: &str = "custom_dictionary.txt";
pub const BOILERPLATE_MARKERS_FILE: &str = "boilerplate_markers.txt";
pub const WIPEOUT_MARKERS_FILE: &str = "wipeout_markers.txt";

/// Raw contents of the six seed lists
#[derive(Debug, Clone, Default)]
pub struct SeedLists {
    pub words: String,
    pub medical_terms: String,
    pub medical_acronyms: String,
    pub custom_dictionary: String,
    /// One regex per line, removed from every document
    pub boilerplate_markers: String,
    /// One regex per line, a matching document is discarded
    pub wipeout_markers: String,
}

impl SeedLists {
    /// Non-blank, trimmed lines of the boilerplate marker list
    pub fn boilerplate_patterns(&self) -> impl Iterator<Item = &str> {
        marker_lines(&self.boilerplate_markers)
    }

    /// Non-blank, trimmed lines of the wipeout marker list
    pub fn wipeout_patterns(&self) -> impl Iterator<Item = &str> {
        marker_lines(&self.wipeout_markers)
    }
}

fn marker_lines(list: &str) -> impl Iterator<Item = &str> {
    list.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// Source of seed lists
pub trait SeedProvider {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Load all six lists
    fn load(&self) -> Result<SeedLists>;
}

/// Lists compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSeeds;

impl SeedProvider for EmbeddedSeeds {
    fn name(&self) -> &str {
        "embedded"
    }

    fn load(&self) -> Result<SeedLists> {
        Ok(SeedLists {
            words: include_str!("../data/words.txt").to_string(),
            medical_terms: include_str!("../data/medical_terms.txt").to_string(),
            medical_acronyms: include_str!("../data/medical_acronyms.txt").to_string(),
            custom_dictionary: include_str!("../data/custom_dictionary.txt").to_string(),
            boilerplate_markers: include_str!("../data/boilerplate_markers.txt").to_string(),
            wipeout_markers: include_str!("../data/wipeout_markers.txt").to_string(),
        })
    }
}

/// Lists read from a directory
///
/// The four word lists are required. The marker lists are optional and
/// default to empty.
#[derive(Debug, Clone)]
pub struct DirectorySeeds {
    dir: PathBuf,
}

impl DirectorySeeds {
    /// Create a provider for `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the lists are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_required(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        std::fs::read_to_string(&path).map_err(|e| {
            SafeguardError::Seed(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    fn read_optional(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        if !path.exists() {
            tracing::debug!(file = %path.display(), "Optional seed list not present");
            return Ok(String::new());
        }
        self.read_required(file)
    }
}

impl SeedProvider for DirectorySeeds {
    fn name(&self) -> &str {
        "directory"
    }

    fn load(&self) -> Result<SeedLists> {
        if !self.dir.is_dir() {
            return Err(SafeguardError::Seed(format!(
                "Seed directory does not exist: {}",
                self.dir.display()
            )));
        }

        Ok(SeedLists {
            words: self.read_required(WORDS_FILE)?,
            medical_terms: self.read_required(MEDICAL_TERMS_FILE)?,
            medical_acronyms: self.read_required(MEDICAL_ACRONYMS_FILE)?,
            custom_dictionary: self.read_required(CUSTOM_DICTIONARY_FILE)?,
            boilerplate_markers: self.read_optional(BOILERPLATE_MARKERS_FILE)?,
            wipeout_markers: self.read_optional(WIPEOUT_MARKERS_FILE)?,
        })
    }
}
