//! Boilerplate and wipeout rules
//!
//! Boilerplate rules erase fixed text (letterheads, migration banners,
//! consultant signatures) from a document. Wipeout rules decide whether
//! what is left is worth keeping at all. Both come from the seed marker
//! lists and from a dynamic [`RuleSource`].

pub mod boilerplate;
pub mod source;
pub mod wipeout;

pub use boilerplate::{strip_with, BoilerplateRule, BoilerplateStripper};
pub use source::{FileRuleSource, HttpRuleSource, RuleSource};
pub use wipeout::{gatekeep_with, DiscardReason, DocumentGatekeeper, Verdict, WipeoutRule};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of dynamic rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Text erased from every document
    Boilerplate,
    /// Whole-document discard rules
    Wipeout,
}

impl RuleKind {
    /// Both kinds, in load order
    pub const ALL: [RuleKind; 2] = [RuleKind::Boilerplate, RuleKind::Wipeout];

    /// Lower-case name, also used as the rule service path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boilerplate => "boilerplate",
            Self::Wipeout => "wipeout",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
