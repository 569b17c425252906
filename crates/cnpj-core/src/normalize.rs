//! # Normalizer
//!
//! Turns free-form input into a canonical candidate.
//!
//! Purely lexical: characters outside the active alphabet are dropped and
//! letters are upper-cased. Length and segment rules belong to
//! [`crate::structure`].

use crate::alphabet::Alphabet;

/// Strips everything the alphabet does not keep and upper-cases letters.
///
/// ## Example
/// ```rust
/// use cnpj_core::{normalize::normalize, Alphabet};
///
/// assert_eq!(normalize("11.222.333/0001-81", Alphabet::Numeric), "11222333000181");
/// assert_eq!(normalize("ab.cde.123/0001-66", Alphabet::Alphanumeric), "ABCDE123000166");
/// assert_eq!(normalize("ab.cde.123/0001-66", Alphabet::Numeric), "123000166");
/// ```
pub fn normalize(raw: &str, alphabet: Alphabet) -> String {
    raw.chars()
        .filter(|&c| alphabet.keeps(c))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Absent input normalizes to an empty candidate.
pub fn normalize_opt(raw: Option<&str>, alphabet: Alphabet) -> String {
    raw.map(|raw| normalize(raw, alphabet)).unwrap_or_default()
}

/// Whether the raw input carries any of the display separators `. / -`.
pub fn has_separators(raw: &str) -> bool {
    raw.chars().any(is_separator)
}

#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    matches!(c, '.' | '/' | '-')
}
