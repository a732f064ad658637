//! One-way hashing of personal data.

use sha2::{Digest, Sha256};

/// How a value is canonicalized before hashing.
///
/// Two spellings of the same fact (`" Jane@Example.com"` and
/// `"jane@example.com"`) must produce the same digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Trim surrounding whitespace only.
    Trim,
    /// Trim and lowercase.
    Lowercase,
    /// Trim and lowercase; e-mail addresses.
    Email,
    /// Keep ASCII digits only; phone numbers with country code.
    Phone,
    /// Keep alphabetic characters only, lowercased; names, cities, states.
    AlphaLower,
    /// Keep ASCII digits only; dates of birth as `YYYYMMDD`.
    Digits,
}

impl Normalization {
    /// Apply the normalization.
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Trim => value.trim().to_owned(),
            Self::Lowercase | Self::Email => value.trim().to_lowercase(),
            Self::Phone | Self::Digits => value.chars().filter(char::is_ascii_digit).collect(),
            Self::AlphaLower => value
                .chars()
                .filter(|c| c.is_alphabetic())
                .flat_map(char::to_lowercase)
                .collect(),
        }
    }
}

/// SHA-256 digest of `value`, as 64 lower-case hex characters.
#[must_use]
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Whether `value` already has the shape of a [`sha256_hex`] digest.
#[must_use]
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Normalize then hash a personal-data value.
///
/// A value that is already a digest passes through unchanged, so
/// `hash_pii(hash_pii(x, n), n) == hash_pii(x, n)`.
#[must_use]
pub fn hash_pii(value: &str, normalization: Normalization) -> String {
    if is_sha256_hex(value) {
        return value.to_owned();
    }
    sha256_hex(&normalization.apply(value))
}
