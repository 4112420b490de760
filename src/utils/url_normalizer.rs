//! URL normalization and input sanitation.
//!
//! The canonical form produced here is the only form used for lookups and storage.
//! The check is deliberately permissive: a destination only needs a `.` somewhere to
//! count as having a domain. Query construction safety comes from bound parameters in
//! the persistence layer; character stripping is an additional input constraint.

/// Characters removed from user input before it reaches the store.
const UNSAFE_CHARS: &[char] = &['"', '\'', '\\', '<', '>'];

/// Prefix prepended to destinations that do not name a scheme.
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Reasons a raw URL can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL has no domain marker ('.')")]
    NoDomainMarker,
}

impl UrlNormalizationError {
    /// Short identifier used in API error details.
    pub fn reason(&self) -> &'static str {
        match self {
            UrlNormalizationError::Empty => "empty",
            UrlNormalizationError::NoDomainMarker => "no_domain_marker",
        }
    }
}

/// Removes quote characters, backslashes and angle brackets.
///
/// Shared by URL normalization and token resolution.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_unsafe_chars("ab\"c<d>"), "abcd");
/// ```
pub fn strip_unsafe_chars(input: &str) -> String {
    input.chars().filter(|c| !UNSAFE_CHARS.contains(c)).collect()
}

/// Normalizes a raw URL to its canonical form.
///
/// # Rules
///
/// 1. Unsafe characters are stripped (see [`strip_unsafe_chars`])
/// 2. Surrounding whitespace is trimmed; an empty result is rejected
/// 3. Input without a `.` is rejected
/// 4. Input not starting with `http` (case-sensitive) gets `http://` prepended
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] or [`UrlNormalizationError::NoDomainMarker`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "http://example.com");
/// assert_eq!(normalize_url("https://example.com").unwrap(), "https://example.com");
/// assert!(normalize_url("notaurl").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let sanitized = strip_unsafe_chars(input);
    let trimmed = sanitized.trim();

    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if !trimmed.contains('.') {
        return Err(UrlNormalizationError::NoDomainMarker);
    }

    if trimmed.starts_with("http") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{DEFAULT_SCHEME_PREFIX}{trimmed}"))
    }
}
