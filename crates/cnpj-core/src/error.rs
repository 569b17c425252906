//! # Error Types
//!
//! Validation reasons and checksum errors for cnpj-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError   - one reason per failed rule, collected in order     │
//! │  ├── input shape   Empty, WrongLength, InvalidRootCharacters, ...       │
//! │  ├── layout        MisplacedSeparator, MissingFormatting, ...           │
//! │  └── semantic      ReservedOrder, CheckDigitMismatch                    │
//! │                                                                         │
//! │  ValidationWarning - non-fatal remarks (surrounding whitespace, ...)    │
//! │                                                                         │
//! │  ChecksumError     - misuse of the low-level checksum API               │
//! │                      (wrong slice length, unmapped character)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Malformed input is an expected case: reasons are collected, never thrown
//! 2. Reasons are enum variants, their `Display` is the human-readable text
//! 3. Include context in messages (observed length, offending characters)

use serde::{Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single failed validation rule.
///
/// Serializes as its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No input was supplied at all.
    #[error("CNPJ input is missing")]
    Missing,

    /// The input was an empty string.
    #[error("CNPJ cannot be empty")]
    Empty,

    /// The normalized candidate is not 14 characters long.
    #[error("CNPJ must have 14 characters, found {found}")]
    WrongLength { found: usize },

    /// The root holds characters outside the active alphabet.
    #[error("root contains invalid characters: {}", join_chars(.chars))]
    InvalidRootCharacters { chars: Vec<char> },

    /// The order segment holds non-digits.
    #[error("order must contain only digits, found '{order}'")]
    NonNumericOrder { order: String },

    /// The check digit segment holds non-digits.
    #[error("check digits must be numeric, found '{digits}'")]
    NonNumericCheckDigits { digits: String },

    /// All 14 characters are the same (e.g. `00000000000000`).
    #[error("CNPJ cannot have all characters equal")]
    AllCharactersEqual,

    /// Order `0000` is reserved and never assigned.
    #[error("establishment order cannot be 0000")]
    ReservedOrder,

    /// The supplied check digits differ from the computed ones.
    #[error("invalid check digits: expected {expected}, found {found}")]
    CheckDigitMismatch { expected: String, found: String },

    /// Check digits could not be computed.
    #[error("{0}")]
    Checksum(#[from] ChecksumError),

    /// Spaces inside the formatted rendering.
    #[error("CNPJ contains spaces")]
    EmbeddedSpace,

    /// Tabs inside the formatted rendering.
    #[error("CNPJ contains tabs")]
    EmbeddedTab,

    /// Line breaks inside the formatted rendering.
    #[error("CNPJ contains line breaks")]
    EmbeddedLineBreak,

    /// Characters that are neither alphabet symbols nor separators.
    #[error("invalid characters found: {}", join_chars(.chars))]
    InvalidCharacters { chars: Vec<char> },

    /// A bare canonical string where a formatted one was expected.
    #[error("CNPJ without formatting, expected AA.AAA.AAA/NNNN-DD")]
    MissingFormatting,

    /// The formatted rendering is not 18 characters long.
    #[error("formatted CNPJ must have 18 characters, found {found}")]
    WrongFormattedLength { found: usize },

    /// A separator is missing or misplaced. `position` is 1-based.
    #[error("expected '{expected}' at position {position}, found '{found}'")]
    MisplacedSeparator {
        expected: char,
        position: usize,
        found: char,
    },

    /// Separators are in place but a segment has the wrong character class.
    #[error("invalid format, expected AA.AAA.AAA/NNNN-DD (A = letter or digit, N = digit)")]
    PatternMismatch,
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Validation Warning
// =============================================================================

/// Non-fatal remarks attached to an otherwise accepted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("CNPJ has leading or trailing whitespace")]
    SurroundingWhitespace,

    #[error("CNPJ provided without formatting")]
    Unformatted,
}

impl Serialize for ValidationWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Checksum Error
// =============================================================================

/// Misuse of the checksum API.
///
/// Never produced while validating normalized input that already passed the
/// structural rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    #[error("checksum input must have {expected} characters, found {found}")]
    WrongLength { expected: usize, found: usize },

    /// `position` is 1-based.
    #[error("character '{ch}' at position {position} has no checksum value")]
    UnmappedCharacter { ch: char, position: usize },
}

/// Convenience type alias for checksum results.
pub type ChecksumResult<T> = Result<T, ChecksumError>;

fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Unit Tests
// =============================================================================
