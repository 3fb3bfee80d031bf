use serde::{Deserialize, Deserializer};

/// Normalizes a name by stripping any surrounding whitespace and
/// composing it into Unicode Normalization Form C.
///
/// ```
/// use ficha::normalization::normalize_name;
/// assert_eq!(normalize_name(" hï "), "hï");
/// ```
pub fn normalize_name(name: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    name.as_ref().trim().nfc().to_string()
}

/// Normalizes the line endings of a multi-line field to bare `\n`.
/// HTML textareas submit CRLF pairs.
pub fn normalize_newlines(text: impl AsRef<str>) -> String {
    text.as_ref().replace("\r\n", "\n")
}

/// Deserializes a `String` after running it through `normalize_name`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de> {
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(normalize_name(s))
}

/// Deserializes a `String` after running it through `normalize_newlines`.
pub fn deserialize_multiline<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de> {
    let s: String = Deserialize::deserialize(deserializer)?;
    Ok(normalize_newlines(s))
}
