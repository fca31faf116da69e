//! URL normalization and sanity checks.
//!
//! Deliberately permissive: the input is trimmed and scheme-qualified, then
//! subjected to a length limit and a minimal shape heuristic. It is not a
//! URL grammar check.

/// Maximum length of a scheme-qualified URL, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// A scheme-qualified URL must be strictly longer than this.
const MIN_URL_LENGTH: usize = 10;

const DEFAULT_SCHEME: &str = "https://";

/// Errors that can occur during URL normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    EmptyInput,

    #[error("URL is too long ({length} characters, max 2048)")]
    TooLong { length: usize },

    #[error("Invalid URL format")]
    InvalidFormat { url: String },
}

/// Normalizes raw user input into a scheme-qualified URL.
///
/// # Rules
///
/// 1. Leading and trailing whitespace is removed
/// 2. Empty input is rejected
/// 3. `https://` is prepended unless the input starts with `http://` or `https://`
/// 4. More than [`MAX_URL_LENGTH`] characters is rejected
/// 5. No `.` or 10 characters or fewer is rejected
/// 6. Control characters anywhere inside are rejected, since they cannot
///    appear in a `Location` header
///
/// # Errors
///
/// Returns [`UrlValidationError::EmptyInput`], [`UrlValidationError::TooLong`]
/// or [`UrlValidationError::InvalidFormat`], checked in that order.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("  example.com ").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
/// assert!(normalize_url("http://a.b").is_err()); // exactly 10 characters
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::EmptyInput);
    }

    let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{trimmed}")
    };

    let length = url.chars().count();

    if length > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong { length });
    }

    if !url.contains('.') || length <= MIN_URL_LENGTH || url.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat { url });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_domain_gets_https() {
        let result = normalize_url("example.com");
        assert_eq!(result.unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_keeps_http_scheme() {
        let result = normalize_url("http://example.com/path");
        assert_eq!(result.unwrap(), "http://example.com/path");
    }

    #[test]
    fn test_normalize_keeps_https_scheme() {
        let result = normalize_url("https://example.com/path?q=1#frag");
        assert_eq!(result.unwrap(), "https://example.com/path?q=1#frag");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let result = normalize_url("  \t https://example.com \n");
        assert_eq!(result.unwrap(), "https://example.com");
    }

    #[test]
    fn test_normalize_empty_string() {
        assert_eq!(normalize_url(""), Err(UrlValidationError::EmptyInput));
    }

    #[test]
    fn test_normalize_whitespace_only() {
        assert_eq!(normalize_url("   \n\t"), Err(UrlValidationError::EmptyInput));
    }

    #[test]
    fn test_normalize_shortest_accepted_input() {
        // "https://a.b" is 11 characters
        let result = normalize_url("a.b");
        assert_eq!(result.unwrap(), "https://a.b");
    }

    #[test]
    fn test_normalize_ten_characters_rejected() {
        // "http://a.b" is exactly 10 characters
        let result = normalize_url("http://a.b");
        assert!(matches!(
            result,
            Err(UrlValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_eleven_characters_with_http_accepted() {
        let result = normalize_url("http://ab.c");
        assert_eq!(result.unwrap(), "http://ab.c");
    }

    #[test]
    fn test_normalize_without_dot_rejected() {
        let result = normalize_url("localhost:3000/path");
        assert_eq!(
            result,
            Err(UrlValidationError::InvalidFormat {
                url: "https://localhost:3000/path".to_string()
            })
        );
    }

    #[test]
    fn test_normalize_at_max_length_accepted() {
        let prefix = "https://example.com/";
        let url = format!("{}{}", prefix, "a".repeat(MAX_URL_LENGTH - prefix.len()));
        assert_eq!(url.len(), MAX_URL_LENGTH);

        assert!(normalize_url(&url).is_ok());
    }

    #[test]
    fn test_normalize_over_max_length_rejected() {
        let prefix = "https://example.com/";
        let url = format!("{}{}", prefix, "a".repeat(MAX_URL_LENGTH - prefix.len() + 1));

        assert_eq!(
            normalize_url(&url),
            Err(UrlValidationError::TooLong {
                length: MAX_URL_LENGTH + 1
            })
        );
    }

    #[test]
    fn test_normalize_length_checked_after_scheme_prefix() {
        // 2044 characters of input become 2052 once "https://" is prepended
        let input = format!("{}.com", "a".repeat(2040));
        assert!(matches!(
            normalize_url(&input),
            Err(UrlValidationError::TooLong { length: 2052 })
        ));
    }

    #[test]
    fn test_normalize_counts_characters_not_bytes() {
        let url = format!("https://example.com/{}", "ü".repeat(100));
        assert!(normalize_url(&url).is_ok());
    }

    #[test]
    fn test_normalize_interior_control_character_rejected() {
        assert!(matches!(
            normalize_url("example.com/a\u{1}b"),
            Err(UrlValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            normalize_url("https://example.com/a\nb"),
            Err(UrlValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            normalize_url("https://example.com/\u{7f}"),
            Err(UrlValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_scheme_prefix_is_case_sensitive() {
        let result = normalize_url("HTTP://EXAMPLE.COM");
        assert_eq!(result.unwrap(), "https://HTTP://EXAMPLE.COM");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(UrlValidationError::EmptyInput.to_string(), "URL is required");
        assert!(
            UrlValidationError::TooLong { length: 3000 }
                .to_string()
                .contains("3000")
        );
    }
}
