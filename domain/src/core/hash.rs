//! Stable string hashing.
//!
//! Personas, display attributes and vote directions are all derived from
//! this hash, so its output must never change between releases: rows that
//! are already persisted were produced with it.

/// Modulus that keeps the rolling hash small.
const HASH_MODULUS: u64 = 1_000_000;

/// Rolling polynomial hash over UTF-16 code units.
///
/// `h = (h * 31 + unit) mod 1_000_000`. The result is always below
/// `1_000_000`.
pub fn stable_hash(value: &str) -> u64 {
    value
        .encode_utf16()
        .fold(0u64, |hash, unit| (hash * 31 + u64::from(unit)) % HASH_MODULUS)
}
