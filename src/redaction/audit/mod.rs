//! Audit logging module
//!
//! Records what each redaction removed without ever writing the removed text.

pub mod logger;

pub use logger::AuditLogger;
