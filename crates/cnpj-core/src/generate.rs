//! # Generator
//!
//! Builds checksum-valid identifiers from a supplied or random root.
//!
//! ## Flow
//! ```text
//! root? ──► normalize ──► truncate/pad to 8 ──┐
//!   │                                          ├──► + "0001" ──► check digits ──► format
//!   └─ None ──► 8 random alphabet symbols ─────┘
//! ```
//!
//! Randomness is injected through [`rand::Rng`]; [`generate`] uses the
//! thread-local generator.

use rand::Rng;
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::checksum::digits_for_values;
use crate::format::format_canonical;
use crate::normalize::normalize;
use crate::{HEAD_OFFICE_ORDER, ROOT_LENGTH};

/// Generates a valid formatted head-office identifier with the thread-local RNG.
pub fn generate(root: Option<&str>, alphabet: Alphabet) -> String {
    generate_with(&mut rand::thread_rng(), root, alphabet)
}

/// Generates a valid formatted head-office identifier.
///
/// A supplied root is normalized for `alphabet` (upper-casing letters and
/// dropping anything else), truncated to 8 characters and right-padded with
/// `'0'`. Without a root, 8 symbols are drawn from `rng`.
///
/// ## Example
/// ```rust
/// use cnpj_core::{generate::generate_with, Alphabet};
///
/// let mut rng = rand::thread_rng();
/// assert_eq!(generate_with(&mut rng, Some("abcde123"), Alphabet::Alphanumeric), "AB.CDE.123/0001-66");
/// assert_eq!(generate_with(&mut rng, Some("11222333"), Alphabet::Numeric), "11.222.333/0001-81");
/// assert_eq!(generate_with(&mut rng, Some("1122"), Alphabet::Numeric), "11.220.000/0001-13");
/// ```
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    root: Option<&str>,
    alphabet: Alphabet,
) -> String {
    let mut values: Vec<u32> = match root {
        Some(root) => supplied_root(root, alphabet),
        None => (0..ROOT_LENGTH)
            .map(|_| rng.gen_range(0..alphabet.radix()))
            .collect(),
    };
    values.extend(HEAD_OFFICE_ORDER.bytes().map(|b| u32::from(b - b'0')));

    let digits = digits_for_values(&values);
    let canonical: String = values
        .iter()
        .filter_map(|&value| alphabet.symbol(value))
        .chain(digits.to_string().chars())
        .collect();

    debug!(%alphabet, supplied_root = root.is_some(), %canonical, "generated CNPJ");
    format_canonical(&canonical)
}

/// Generates `count` identifiers sharing the same root policy.
pub fn generate_many<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    root: Option<&str>,
    alphabet: Alphabet,
) -> Vec<String> {
    (0..count)
        .map(|_| generate_with(&mut *rng, root, alphabet))
        .collect()
}

/// Root values of a caller-supplied root: normalized, truncated, zero-padded.
fn supplied_root(root: &str, alphabet: Alphabet) -> Vec<u32> {
    let mut values: Vec<u32> = normalize(root, alphabet)
        .chars()
        .filter_map(|c| alphabet.value_of(c))
        .take(ROOT_LENGTH)
        .collect();
    values.resize(ROOT_LENGTH, 0);
    values
}

// =============================================================================
// Unit Tests
// =============================================================================
