//! Boolean flags delivered as strings by remote configuration.

/// Parse a remote flag value.
///
/// Only the literal `"true"` enables a flag. Anything else, including
/// `"TRUE"`, `"1"` and a missing value, leaves it off.
pub fn parse_boolean_flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("true"))
}
