//! # cnpj-core: Pure CNPJ Validation Engine
//!
//! This crate validates, formats, parses and generates Brazilian company tax
//! identifiers (CNPJ). It contains the whole grammar and checksum engine as
//! pure functions with zero I/O dependencies.
//!
//! ## Identifier Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  AA.AAA.AAA / NNNN - DD                                 │
//! │                  ──────────   ────   ──                                 │
//! │                     root      order  check digits                       │
//! │                   (8 chars)  (4 dig)  (2 dig)                           │
//! │                                                                         │
//! │  Legacy:   root is digits only          11.222.333/0001-81              │
//! │  2026+:    root may contain A-Z         AB.CDE.123/0001-66              │
//! │                                                                         │
//! │  order 0001 = head office (matriz), 0002..9999 = branch (filial)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`alphabet`] - The variation point: legacy numeric vs alphanumeric roots
//! - [`normalize`] - Strips separators and upper-cases letters
//! - [`structure`] - Length, character-class and establishment rules
//! - [`checksum`] - Positional-weight modulo-11 check digits
//! - [`format`] - Rendering and the formatted-layout checker
//! - [`generate`] - Builds valid identifiers from given or random roots
//! - [`validator`] - Aggregates everything into a [`ValidationOutcome`]
//! - [`types`] - Outcome and parts types shared with callers
//! - [`error`] - Validation reasons and checksum errors
//!
//! ## Example Usage
//!
//! ```rust
//! use cnpj_core::{EstablishmentKind, Validator};
//!
//! let validator = Validator::default();
//!
//! let outcome = validator.validate("11.222.333/0001-81");
//! assert!(outcome.valid);
//! assert_eq!(outcome.canonical, "11222333000181");
//!
//! let parts = validator.extract_parts("11.222.333/0002-62").unwrap();
//! assert_eq!(parts.establishment, EstablishmentKind::Branch { number: 2 });
//!
//! assert!(!validator.is_valid("00.000.000/0000-00"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod alphabet;
pub mod checksum;
pub mod error;
pub mod format;
pub mod generate;
pub mod normalize;
pub mod structure;
pub mod types;
pub mod validator;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use alphabet::{Alphabet, Generation};
pub use checksum::CheckDigits;
pub use error::{ChecksumError, ValidationError, ValidationWarning};
pub use types::{EstablishmentKind, IdentifierParts, ValidationOutcome};
pub use validator::Validator;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of the canonical (unformatted) identifier.
pub const CNPJ_LENGTH: usize = 14;

/// Length of the formatted rendering `AA.AAA.AAA/NNNN-DD`.
pub const FORMATTED_LENGTH: usize = 18;

/// Length of the root segment.
pub const ROOT_LENGTH: usize = 8;

/// Length of the order (establishment) segment.
pub const ORDER_LENGTH: usize = 4;

/// Root plus order: the characters the first check digit is computed over.
pub const BASE_LENGTH: usize = ROOT_LENGTH + ORDER_LENGTH;

/// Order code of a head office. Every generated identifier uses it.
pub const HEAD_OFFICE_ORDER: &str = "0001";

// =============================================================================
// Free Functions (extended alphabet, format check enabled)
// =============================================================================

/// Validates `text` with the default [`Validator`].
pub fn validate(text: &str) -> ValidationOutcome {
    Validator::default().validate(text)
}

/// Structural and checksum validity only, no formatted-layout requirement.
pub fn is_valid(text: &str) -> bool {
    Validator::default().is_valid(text)
}

/// Renders `text` as `AA.AAA.AAA/NNNN-DD`, or an empty string.
pub fn format(text: &str) -> String {
    Validator::default().format(text)
}

/// Splits `text` into its segments.
pub fn extract_parts(text: &str) -> Option<IdentifierParts> {
    Validator::default().extract_parts(text)
}

/// Generates a valid formatted identifier using the thread-local RNG.
pub fn generate(root: Option<&str>) -> String {
    Validator::default().generate(root)
}
