//! Deterministic storage-name derivation and header-value stripping helpers.

/// Derive the on-disk name for an extracted part.
///
/// The message key is split on `.` and the first two segments (fewer if not
/// present) are concatenated with no separator to form a compact prefix;
/// the declared file name is then joined with a single `.`:
///
/// ```
/// assert_eq!(
///     mailcarve::sanitize::storage_name("42-case.eml", "photo.jpg"),
///     "42-caseeml.photo.jpg"
/// );
/// ```
///
/// Names only need to be unique within message scope. Pure function:
/// identical inputs always yield identical output.
pub fn storage_name(message_key: &str, declared_name: &str) -> String {
    let prefix: String = message_key.split('.').take(2).collect();
    format!("{prefix}.{declared_name}")
}

/// Trim, then remove one matching pair of surrounding `'` or `"` quotes.
///
/// Identity when the value is not quoted or the quotes do not match.
pub fn strip_quotes(value: &str) -> &str {
    strip_pair(value, &[('"', '"'), ('\'', '\'')])
}

/// Trim, then remove one matching pair of surrounding angle brackets.
///
/// Used on `Content-ID` values, which conventionally arrive as `<id>`.
pub fn strip_angle_brackets(value: &str) -> &str {
    strip_pair(value, &[('<', '>')])
}

fn strip_pair<'a>(value: &'a str, pairs: &[(char, char)]) -> &'a str {
    let trimmed = value.trim();
    for &(open, close) in pairs {
        if trimmed.len() >= 2 && trimmed.starts_with(open) && trimmed.ends_with(close) {
            return &trimmed[open.len_utf8()..trimmed.len() - close.len_utf8()];
        }
    }
    trimmed
}
