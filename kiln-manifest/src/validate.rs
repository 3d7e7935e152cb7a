//! Span helpers for locating configuration values in the raw TOML source.

use miette::SourceSpan;

/// Find the span of a string value in the TOML source.
///
/// Searches for the quoted form first so the label lands on the value
/// itself, not on an unrelated occurrence of the same text.
pub(crate) fn find_str_span(src: &str, value: &str) -> Option<SourceSpan> {
    if value.is_empty() {
        return None;
    }

    let quoted = format!("\"{value}\"");
    if let Some(pos) = src.find(&quoted) {
        // +1 to skip the opening quote
        return Some(SourceSpan::from((pos + 1, value.len())));
    }

    src.find(value)
        .map(|pos| SourceSpan::from((pos, value.len())))
}

/// Find the span of a table key in the TOML source.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let patterns = [format!("{key} ="), format!("{key}=")];
    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            return Some(SourceSpan::from((pos, key.len())));
        }
    }
    find_str_span(src, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_str_span_prefers_quoted() {
        let src = "packages = \"com.acme.*\"\n";
        let span = find_str_span(src, "com.acme.*").unwrap();
        assert_eq!(span.offset(), 12);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_find_str_span_missing() {
        assert!(find_str_span("packages = \"*\"", "absent").is_none());
        assert!(find_str_span("anything", "").is_none());
    }

    #[test]
    fn test_find_key_span() {
        let src = "[project]\noutput_dir = \"\"\n";
        let span = find_key_span(src, "output_dir").unwrap();
        assert_eq!(span.offset(), 10);
        assert_eq!(span.len(), 10);
    }
}
