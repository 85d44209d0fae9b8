//! Field-level text helpers

/// Trims a field, mapping absent and whitespace-only values to `None`
///
/// # Examples
///
/// ```
/// use safeguard::domain::text::trim_to_option;
///
/// assert_eq!(trim_to_option(Some("\t hello \n")), Some("hello".to_string()));
/// assert_eq!(trim_to_option(Some("   ")), None);
/// assert_eq!(trim_to_option(None), None);
/// ```
pub fn trim_to_option(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns true when a value is absent or contains only whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
