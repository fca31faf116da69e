//! Short code generation.
//!
//! Codes are fixed-length strings drawn uniformly from the base62 alphabet.
//! Uniqueness is not decided here; see
//! [`crate::application::services::UrlService`] for the allocation loop.

use rand::Rng;

/// The 62 symbols short codes are built from.
pub const BASE62_ALPHABET: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes.
pub const CODE_LENGTH: usize = 6;

/// Longest code the storage layer accepts.
pub const MAX_CODE_LENGTH: usize = 10;

/// Codes that are also fixed route segments and must never be handed out.
pub const RESERVED_CODES: &[&str] = &["api", "health", "list", "shorten", "static", "favicon"];

/// Generates a random base62 short code of [`CODE_LENGTH`] characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..BASE62_ALPHABET.len());
            BASE62_ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is one of [`RESERVED_CODES`].
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` could have been stored at all.
///
/// Used to answer "not found" for obviously foreign paths without a storage
/// round trip.
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
