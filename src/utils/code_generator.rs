//! Short token generation.
//!
//! Tokens are collision-avoidance identifiers, not credentials, so they are drawn from
//! the thread-local non-cryptographic generator. Global uniqueness is the caller's job
//! (see [`crate::application::services::LinkService`]).

use rand::Rng;

/// Token alphabet: digits, uppercase, lowercase (62 symbols).
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generates a token of exactly `length` symbols from [`ALPHABET`].
///
/// Each symbol is sampled independently and uniformly from `[0, ALPHABET.len())`.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(4);
/// assert_eq!(code.len(), 4);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Source of candidate tokens.
///
/// Lets the shortening service be driven by a scripted sequence in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Default [`CodeGenerator`] backed by [`generate_code`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_code_has_requested_length() {
        for length in [1, 4, 8, 32] {
            assert_eq!(generate_code(length).len(), length);
        }
    }

    #[test]
    fn test_generate_code_zero_length() {
        assert!(generate_code(0).is_empty());
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..1000 {
            let code = generate_code(4);
            assert_eq!(code.len(), 4);
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "bad code: {code}");
        }
    }

    #[test]
    fn test_generate_code_reaches_alphabet_edges() {
        let mut seen = HashSet::new();

        for _ in 0..2000 {
            seen.extend(generate_code(16).bytes());
        }

        assert!(seen.contains(&b'0'));
        assert!(seen.contains(&b'z'));
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn test_random_generator_delegates() {
        let code = RandomCodeGenerator.generate(6);
        assert_eq!(code.len(), 6);
    }
}
