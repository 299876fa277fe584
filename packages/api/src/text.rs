//! Small display and validation helpers.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex should not panic")
});

/// Loose `local@domain.tld` check. Good enough to catch typos before the
/// server sees them.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Cut `text` to `max` characters and append `...` when anything was cut.
pub fn truncate_text(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

pub fn capitalize_first_letter(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last@sub.example.org"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.d"));
        assert!(!validate_email("@b.co"));
        assert!(!validate_email(""));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello", 5), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
        // Counts characters, not bytes
        assert_eq!(truncate_text("héllo", 2), "hé...");
        assert_eq!(truncate_text("", 3), "");
    }

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("km"), "Km");
        assert_eq!(capitalize_first_letter("éclair"), "Éclair");
        assert_eq!(capitalize_first_letter(""), "");
    }
}
