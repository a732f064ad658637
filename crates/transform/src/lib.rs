//! # Courier Transform
//!
//! Pure functions actions apply to payload values before they are sent:
//! one-way hashing of personal data, membership checks against finite
//! code sets and timestamp normalization. Nothing here mutates its input
//! or performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod currency;
pub mod hash;
pub mod membership;
pub mod time;

pub use currency::CURRENCY_ISO_CODES;
pub use hash::{Normalization, hash_pii, is_sha256_hex, sha256_hex};
pub use membership::CodeSet;
pub use time::unix_seconds;
