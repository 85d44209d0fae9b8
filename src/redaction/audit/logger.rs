//! Audit logger for redaction operations

use crate::config::SecretString;
use crate::redaction::models::{Detection, RedactionOutcome};
use anyhow::{Context, Result};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    document: String,
    detections_count: usize,
    counts: BTreeMap<String, usize>,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditDetection {
    category: &'static str,
    /// SHA-256 hash of original value, salted when configured (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for redaction operations
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    salt: Option<SecretString>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            salt: None,
        })
    }

    /// Mix a secret into every value hash
    pub fn with_salt(mut self, salt: Option<SecretString>) -> Self {
        self.salt = salt;
        self
    }

    /// Whether entries are written at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log one redacted document
    ///
    /// `document` is a caller-chosen label such as a file name.
    pub fn log_redaction(
        &self,
        document: &str,
        outcome: &RedactionOutcome,
        processing_time_ms: u64,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            document: document.to_string(),
            detections_count: outcome.total_detections(),
            counts: outcome
                .counts_by_category()
                .into_iter()
                .map(|(category, count)| (category.label().to_string(), count))
                .collect(),
            processing_time_ms,
            detections: outcome
                .detections
                .iter()
                .map(|d| self.create_audit_detection(d))
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Create an audit detection entry with hashed PII value
    fn create_audit_detection(&self, detection: &Detection) -> AuditDetection {
        AuditDetection {
            category: detection.category.label(),
            value_hash: self.hash_pii_value(&detection.original_value),
        }
    }

    /// Hash a PII value using SHA-256, prefixed with the salt when one is set
    fn hash_pii_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        if let Some(ref salt) = self.salt {
            hasher.update(salt.expose_secret().as_str());
        }
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}")
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        if self.json_format {
            let json_line =
                serde_json::to_string(entry).context("Failed to serialize audit entry")?;
            writeln!(file, "{json_line}").context("Failed to write audit entry")?;
        } else {
            let counts = entry
                .counts
                .iter()
                .map(|(category, count)| format!("{category}={count}"))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                file,
                "[{}] Document: {} | Detections: {} | Categories: {} | Time: {}ms",
                entry.timestamp,
                entry.document,
                entry.detections_count,
                counts,
                entry.processing_time_ms
            )
            .context("Failed to write audit entry")?;
        }

        Ok(())
    }
}
