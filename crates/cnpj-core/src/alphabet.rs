//! # Alphabet
//!
//! The single variation point of the engine.
//!
//! ## Legacy vs 2026+
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Alphabet::Numeric        root: 0-9          value('7') = 7             │
//! │  Alphabet::Alphanumeric   root: 0-9, A-Z     value('A') = 10            │
//! │                                              value('Z') = 35            │
//! │                                                                         │
//! │  Order and check digits are digits-only under BOTH alphabets.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Digits map to themselves under both alphabets, so a digit-only root has
//! the same check digits whichever alphabet computes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Root symbols ordered by checksum value: `SYMBOLS[v]` has value `v`.
pub(crate) const SYMBOLS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Characters accepted in a CNPJ root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    /// Legacy identifiers: digits only.
    Numeric,
    /// 2026+ identifiers: digits and uppercase Latin letters in the root.
    #[default]
    Alphanumeric,
}

impl Alphabet {
    /// Number of distinct root symbols (10 or 36).
    #[inline]
    pub const fn radix(self) -> u32 {
        match self {
            Alphabet::Numeric => 10,
            Alphabet::Alphanumeric => 36,
        }
    }

    /// Root symbols of this alphabet, ordered by checksum value.
    pub fn root_symbols(self) -> &'static [u8] {
        &SYMBOLS[..self.radix() as usize]
    }

    /// Whether the normalizer keeps `c`. Letters are accepted in either case.
    #[inline]
    pub fn keeps(self, c: char) -> bool {
        match self {
            Alphabet::Numeric => c.is_ascii_digit(),
            Alphabet::Alphanumeric => c.is_ascii_alphanumeric(),
        }
    }

    /// Whether `c` is a valid root character of a canonical identifier.
    #[inline]
    pub fn accepts_root(self, c: char) -> bool {
        match self {
            Alphabet::Numeric => c.is_ascii_digit(),
            Alphabet::Alphanumeric => c.is_ascii_digit() || c.is_ascii_uppercase(),
        }
    }

    /// Checksum value of a root character.
    ///
    /// Digits map to 0-9. Under [`Alphabet::Alphanumeric`] letters map to
    /// 10-35 (`A` = 10 … `Z` = 35) regardless of case.
    pub fn value_of(self, c: char) -> Option<u32> {
        if let Some(digit) = c.to_digit(10) {
            return Some(digit);
        }
        match self {
            Alphabet::Alphanumeric if c.is_ascii_alphabetic() => {
                Some(c.to_ascii_uppercase() as u32 - 'A' as u32 + 10)
            }
            _ => None,
        }
    }

    /// Symbol for a checksum value, the inverse of [`Alphabet::value_of`].
    pub fn symbol(self, value: u32) -> Option<char> {
        self.root_symbols()
            .get(value as usize)
            .map(|&b| b as char)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Numeric => write!(f, "numeric"),
            Alphabet::Alphanumeric => write!(f, "alphanumeric"),
        }
    }
}

impl FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "numeric" | "legacy" => Ok(Alphabet::Numeric),
            "alphanumeric" | "extended" => Ok(Alphabet::Alphanumeric),
            other => Err(format!(
                "Unknown alphabet: '{}'. Valid options: numeric, alphanumeric",
                other
            )),
        }
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Which identifier generation a canonical root belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    /// Root made of digits only.
    Legacy,
    /// Root holding at least one letter.
    Alphanumeric,
}

impl Generation {
    /// Classifies a root.
    pub fn of_root(root: &str) -> Self {
        if root.chars().any(|c| c.is_ascii_alphabetic()) {
            Generation::Alphanumeric
        } else {
            Generation::Legacy
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
