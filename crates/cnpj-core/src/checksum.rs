//! # Checksum Engine
//!
//! Positional-weight modulo-11 check digits.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base:     1  1  2  2  2  3  3  3  0  0  0  1                           │
//! │  weights:  5  4  3  2  9  8  7  6  5  4  3  2                           │
//! │            ─────────────────────────────────────                        │
//! │  sum = 5+4+6+4+18+24+21+18+0+0+0+2 = 102                                │
//! │  102 % 11 = 3          → first digit = 11 - 3 = 8                       │
//! │                                                                         │
//! │  base + '8' with weights 6 5 4 3 2 9 8 7 6 5 4 3 2                      │
//! │  sum % 11 = 10         → second digit = 11 - 10 = 1                     │
//! │                                                                         │
//! │  remainder 0 or 1      → digit 0   (never "invalid")                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Root positions use the alphabet's value mapping (letters 10-35 under the
//! alphanumeric alphabet). Order positions are digits-only for every
//! alphabet.

use serde::Serialize;
use std::fmt;
use std::iter;
use ts_rs::TS;

use crate::alphabet::Alphabet;
use crate::error::{ChecksumError, ChecksumResult};
use crate::{BASE_LENGTH, CNPJ_LENGTH, ROOT_LENGTH};

/// Weights for the first check digit (root + order).
pub const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second check digit (root + order + first digit).
pub const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

// =============================================================================
// Check Digits
// =============================================================================

/// The two verification digits, 0-9 each.
///
/// Displays as the 2-character suffix, e.g. `81`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CheckDigits {
    pub first: u8,
    pub second: u8,
}

impl fmt::Display for CheckDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

/// Weighted sum modulo 11, with remainders 0 and 1 collapsing to digit 0.
fn weighted_digit(values: impl Iterator<Item = u32>, weights: &[u32]) -> u8 {
    let sum: u32 = values.zip(weights).map(|(value, weight)| value * weight).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        (11 - remainder) as u8
    }
}

/// Both digits from the 12 mapped values of root + order.
pub(crate) fn digits_for_values(values: &[u32]) -> CheckDigits {
    let first = weighted_digit(values.iter().copied(), &FIRST_WEIGHTS);
    let second = weighted_digit(
        values
            .iter()
            .copied()
            .take(BASE_LENGTH)
            .chain(iter::once(u32::from(first))),
        &SECOND_WEIGHTS,
    );
    CheckDigits { first, second }
}

/// Maps each character of `input` to its checksum value.
fn mapped_values(input: &str, expected: usize, alphabet: Alphabet) -> ChecksumResult<Vec<u32>> {
    let found = input.chars().count();
    if found != expected {
        return Err(ChecksumError::WrongLength { expected, found });
    }

    input
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            let value = if index < ROOT_LENGTH {
                alphabet.value_of(ch)
            } else {
                ch.to_digit(10)
            };
            value.ok_or(ChecksumError::UnmappedCharacter {
                ch,
                position: index + 1,
            })
        })
        .collect()
}

// =============================================================================
// Public API
// =============================================================================

/// First check digit of a 12-character root + order.
///
/// ## Example
/// ```rust
/// use cnpj_core::{checksum::first_digit, Alphabet};
///
/// assert_eq!(first_digit("112223330001", Alphabet::Numeric), Ok(8));
/// ```
pub fn first_digit(base: &str, alphabet: Alphabet) -> ChecksumResult<u8> {
    let values = mapped_values(base, BASE_LENGTH, alphabet)?;
    Ok(weighted_digit(values.into_iter(), &FIRST_WEIGHTS))
}

/// Second check digit of a 13-character root + order + first digit.
pub fn second_digit(base: &str, alphabet: Alphabet) -> ChecksumResult<u8> {
    let values = mapped_values(base, BASE_LENGTH + 1, alphabet)?;
    Ok(weighted_digit(values.into_iter(), &SECOND_WEIGHTS))
}

/// Both check digits of a 12-character root + order.
pub fn check_digits(base: &str, alphabet: Alphabet) -> ChecksumResult<CheckDigits> {
    let values = mapped_values(base, BASE_LENGTH, alphabet)?;
    Ok(digits_for_values(&values))
}

/// Appends the check digits to a 12-character base, upper-casing letters.
///
/// ## Example
/// ```rust
/// use cnpj_core::{checksum::complete, Alphabet};
///
/// assert_eq!(complete("abcde1230001", Alphabet::Alphanumeric).unwrap(), "ABCDE123000166");
/// ```
pub fn complete(base: &str, alphabet: Alphabet) -> ChecksumResult<String> {
    let digits = check_digits(base, alphabet)?;
    Ok(format!("{}{}", base.to_ascii_uppercase(), digits))
}

/// Verifies the check digits of a 14-character canonical identifier.
///
/// The supplied suffix is compared as a whole against the computed pair.
/// A suffix holding non-digits fails before any arithmetic.
pub fn verify(cnpj: &str, alphabet: Alphabet) -> bool {
    if cnpj.len() != CNPJ_LENGTH || !cnpj.is_ascii() {
        return false;
    }

    let (base, supplied) = cnpj.split_at(BASE_LENGTH);
    if !supplied.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match check_digits(base, alphabet) {
        Ok(expected) => expected.to_string() == supplied,
        Err(_) => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
