//! Domain types for Safeguard.
//!
//! - **Error types** ([`SafeguardError`]) and the [`Result`] alias
//! - **NHS numbers** ([`NhsNumber`]) with Modulus 11 validation
//! - **Field helpers** for trimming nullable text values
//!
//! # Error Handling
//!
//! Only startup and the dynamic rule supply are fallible:
//!
//! ```rust
//! use safeguard::domain::{Result, SafeguardError};
//!
//! fn example() -> Result<()> {
//!     Err(SafeguardError::Configuration("missing seed_dir".to_string()))
//! }
//! ```

pub mod errors;
pub mod nhs;
pub mod result;
pub mod text;

// Re-export commonly used types for convenience
pub use errors::SafeguardError;
pub use nhs::{validate_nhs_number, NhsNumber};
pub use result::Result;
