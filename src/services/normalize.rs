/// Reduces a title to its matching key: ASCII letters and digits only, case preserved.
///
/// A missing title maps to the empty string.
pub fn normalize_title<'a>(raw: impl Into<Option<&'a str>>) -> String {
    raw.into()
        .map(|title| title.chars().filter(char::is_ascii_alphanumeric).collect())
        .unwrap_or_default()
}
