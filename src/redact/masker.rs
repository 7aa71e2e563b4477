//! Display masking for sensitive configuration values

use std::borrow::Cow;

/// Name fragments that mark a variable as holding a secret.
const SENSITIVE_MARKERS: &[&str] = &["KEY", "SECRET"];

/// Values at or below this many characters are fully masked.
const SHORT_SECRET_LEN: usize = 12;
const VISIBLE_PREFIX: usize = 8;
const VISIBLE_SUFFIX: usize = 4;
const FULL_MASK: &str = "***";

/// Returns true if `name` looks like it holds a secret.
///
/// Matching is case-sensitive; registry names are upper-case.
pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_MARKERS.iter().any(|marker| name.contains(marker))
}

/// Render `value` for display under the masking rules for `name`.
///
/// Long secrets keep their first 8 and last 4 characters, short secrets are
/// replaced by `***`, anything else is returned as-is.
pub fn mask_value<'a>(name: &str, value: &'a str) -> Cow<'a, str> {
    if !is_sensitive(name) {
        return Cow::Borrowed(value);
    }

    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= SHORT_SECRET_LEN {
        return Cow::Borrowed(FULL_MASK);
    }

    let prefix: String = chars[..VISIBLE_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    Cow::Owned(format!("{prefix}...{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::{is_sensitive, mask_value};

    #[test]
    fn sensitivity_by_name() {
        assert!(is_sensitive("OPENAI_API_KEY"));
        assert!(is_sensitive("CLIENT_SECRET"));
        assert!(is_sensitive("KEYRING_PATH"));
        assert!(!is_sensitive("QDRANT_URL"));
        assert!(!is_sensitive("DATABASE_URL"));
        assert!(!is_sensitive("openai_api_key"));
    }

    #[test]
    fn long_secret_keeps_prefix_and_suffix() {
        let value = "sk-abcdefghijklmnopq"; // 20 chars
        assert_eq!(value.chars().count(), 20);
        assert_eq!(mask_value("OPENAI_API_KEY", value), "sk-abcde...nopq");
    }

    #[test]
    fn short_secret_is_fully_masked() {
        assert_eq!(mask_value("SERPER_API_KEY", "abc123"), "***");
        // Exactly 12 characters is still considered short
        assert_eq!(mask_value("SERPER_API_KEY", "abcdefghijkl"), "***");
        assert_eq!(mask_value("SERPER_API_KEY", "abcdefghijklm"), "abcdefgh...jklm");
    }

    #[test]
    fn non_sensitive_value_is_unchanged() {
        let value = "postgres://user:pw@localhost:5432/app";
        assert_eq!(mask_value("DATABASE_URL", value), value);
    }

    #[test]
    fn masking_counts_characters_not_bytes() {
        // 14 characters, more bytes than that
        let value = "ééééééééabcdef";
        assert_eq!(mask_value("APP_SECRET", value), "éééééééé...cdef");
    }
}
