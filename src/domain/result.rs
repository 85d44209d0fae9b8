//! Result type alias for Safeguard
//!
//! This module provides a convenient Result type alias that uses SafeguardError
//! as the error type.

use super::errors::SafeguardError;

/// Result type alias for Safeguard operations
///
/// # Examples
///
/// ```
/// use safeguard::domain::result::Result;
/// use safeguard::domain::errors::SafeguardError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SafeguardError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SafeguardError>;
