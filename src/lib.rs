// Safeguard - Clinical report de-identification engine
// Copyright (c) 2025 Safeguard Contributors
// Licensed under the MIT License

//! # Safeguard - Clinical report de-identification
//!
//! Safeguard removes patient-identifying information from free-text clinical
//! reports (radiology, DEXA, imaging) before they leave the clinical record
//! system for research use.
//!
//! ## Overview
//!
//! This library provides four text operations and one validator:
//! - **Redact** dates, phone numbers, NHS-number-shaped digit runs, emails,
//!   postcodes, scrub-listed terms and every word not found in the lexicon
//! - **Strip** boilerplate markers left behind by the reporting system
//! - **Gatekeep** documents, discarding empty ones and those that match a
//!   wipeout rule
//! - **Process** a document through strip, gatekeep and redact in one pass
//! - **Validate** NHS numbers with the Modulus 11 check digit
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`context`] - Shared lexicon, patterns and the swappable dynamic rules
//! - [`redaction`] - Lexicon, scrub list, patterns, tokenizer and scrubber
//! - [`rules`] - Boilerplate and wipeout rules and their dynamic sources
//! - [`seed`] - Word lists and marker lists used to build a context
//! - [`domain`] - Errors, NHS numbers and field helpers
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use safeguard::context::RedactionContext;
//!
//! # fn example() -> safeguard::domain::Result<()> {
//! let context = RedactionContext::embedded()?;
//!
//! let redacted = context.redact("Seen by Dr Bloggs on 12/03/2019.", &["Bloggs"]);
//! assert!(!redacted.contains("Bloggs"));
//! assert!(!redacted.contains("12/03/2019"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Dynamic Rules
//!
//! Boilerplate and wipeout rules maintained outside the process are loaded
//! from a [`rules::RuleSource`]:
//!
//! ```rust,no_run
//! use safeguard::context::RedactionContext;
//! use safeguard::rules::{FileRuleSource, RuleKind};
//!
//! # async fn example() -> safeguard::domain::Result<()> {
//! let context = RedactionContext::embedded()?;
//! let source = FileRuleSource::new("rules.toml");
//!
//! let outcome = context.ensure_rules_loaded(&source, RuleKind::Wipeout).await;
//! if let Some(diagnostic) = outcome.diagnostic() {
//!     eprintln!("{diagnostic}");
//! }
//!
//! let kept = context.gatekeep("Normal appearances.").into_kept();
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Text operations never fail. Construction and rule loading use
//! [`domain::SafeguardError`].

pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod logging;
pub mod redaction;
pub mod rules;
pub mod seed;
