//! # Domain Types
//!
//! Outcome and parts types handed to callers (CLI, HTTP layers, frontends).
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────┐   ┌───────────────────┐   ┌──────────────────┐  │
//! │  │ ValidationOutcome │   │  IdentifierParts  │   │ EstablishmentKind│  │
//! │  │ ───────────────── │   │  ───────────────  │   │ ──────────────── │  │
//! │  │ valid             │──►│  root   (8)       │──►│ HeadOffice       │  │
//! │  │ canonical         │   │  order  (4)       │   │ Branch { n }     │  │
//! │  │ formatted         │   │  checksum (2)     │   │ Invalid          │  │
//! │  │ errors / warnings │   │  generation       │   └──────────────────┘  │
//! │  └───────────────────┘   └───────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of them are built fresh per call and never cached.

use serde::Serialize;
use ts_rs::TS;

use crate::alphabet::{Alphabet, Generation};
use crate::error::{ValidationError, ValidationWarning};
use crate::format::format_canonical;
use crate::{BASE_LENGTH, CNPJ_LENGTH, HEAD_OFFICE_ORDER, ROOT_LENGTH};

// =============================================================================
// Establishment Kind
// =============================================================================

/// What the order segment says about the establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstablishmentKind {
    /// Order `0001` (matriz).
    HeadOffice,
    /// Order `0002`..`9999` (filial).
    Branch { number: u16 },
    /// Order `0000` or non-numeric.
    Invalid,
}

impl EstablishmentKind {
    /// Classifies a 4-character order segment.
    ///
    /// ## Example
    /// ```rust
    /// use cnpj_core::EstablishmentKind;
    ///
    /// assert_eq!(EstablishmentKind::from_order("0001"), EstablishmentKind::HeadOffice);
    /// assert_eq!(EstablishmentKind::from_order("0042"), EstablishmentKind::Branch { number: 42 });
    /// assert_eq!(EstablishmentKind::from_order("0000"), EstablishmentKind::Invalid);
    /// assert_eq!(EstablishmentKind::from_order("00A1"), EstablishmentKind::Invalid);
    /// ```
    pub fn from_order(order: &str) -> Self {
        if order.len() != 4 || !order.bytes().all(|b| b.is_ascii_digit()) {
            return EstablishmentKind::Invalid;
        }

        match order.parse::<u16>() {
            Ok(0) | Err(_) => EstablishmentKind::Invalid,
            Ok(1) => EstablishmentKind::HeadOffice,
            Ok(number) => EstablishmentKind::Branch { number },
        }
    }

    /// Branch number, when this is a branch.
    pub fn branch_number(&self) -> Option<u16> {
        match self {
            EstablishmentKind::Branch { number } => Some(*number),
            _ => None,
        }
    }
}

// =============================================================================
// Identifier Parts
// =============================================================================

/// Read-only view over the segments of a 14-character canonical candidate.
///
/// Parts exist for any candidate of the right length, valid or not; the
/// establishment kind is [`EstablishmentKind::Invalid`] when the order is
/// `0000` or not numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct IdentifierParts {
    /// Characters 1-8.
    pub root: String,
    /// Characters 9-12.
    pub order: String,
    /// Characters 13-14.
    pub checksum: String,
    pub establishment: EstablishmentKind,
    pub generation: Generation,
}

impl IdentifierParts {
    /// Splits a canonical candidate. `None` unless it has exactly 14 characters.
    pub fn from_canonical(canonical: &str) -> Option<Self> {
        let chars: Vec<char> = canonical.chars().collect();
        if chars.len() != CNPJ_LENGTH {
            return None;
        }

        let root: String = chars[..ROOT_LENGTH].iter().collect();
        let order: String = chars[ROOT_LENGTH..BASE_LENGTH].iter().collect();
        let checksum: String = chars[BASE_LENGTH..].iter().collect();

        Some(IdentifierParts {
            establishment: EstablishmentKind::from_order(&order),
            generation: Generation::of_root(&root),
            root,
            order,
            checksum,
        })
    }

    /// The 14-character canonical form.
    pub fn canonical(&self) -> String {
        format!("{}{}{}", self.root, self.order, self.checksum)
    }

    /// The `AA.AAA.AAA/NNNN-DD` rendering.
    pub fn formatted(&self) -> String {
        format_canonical(&self.canonical())
    }

    #[inline]
    pub fn is_head_office(&self) -> bool {
        self.order == HEAD_OFFICE_ORDER
    }
}

// =============================================================================
// Validation Outcome
// =============================================================================

/// Result of a validation call.
///
/// `errors` holds one reason per failed rule, in evaluation order. An invalid
/// outcome always carries at least one reason.
///
/// ## Serialization
/// ```json
/// {
///   "valid": false,
///   "canonical": "11222333000182",
///   "formatted": "11.222.333/0001-82",
///   "alphabet": "alphanumeric",
///   "generation": "legacy",
///   "parts": { "root": "11222333", "order": "0001", "checksum": "82", ... },
///   "errors": ["invalid check digits: expected 81, found 82"],
///   "warnings": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ValidationOutcome {
    pub valid: bool,

    /// Normalized candidate (may be any length when invalid).
    pub canonical: String,

    /// Separator rendering, empty unless `canonical` has 14 characters.
    pub formatted: String,

    /// Alphabet the input was validated against.
    pub alphabet: Alphabet,

    pub generation: Option<Generation>,

    pub parts: Option<IdentifierParts>,

    #[ts(as = "Vec<String>")]
    pub errors: Vec<ValidationError>,

    #[ts(as = "Vec<String>")]
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationOutcome {
    /// Reasons as plain strings, in evaluation order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    /// Establishment kind, when the candidate could be split into parts.
    pub fn establishment(&self) -> Option<EstablishmentKind> {
        self.parts.as_ref().map(|parts| parts.establishment)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_establishment_from_order() {
        assert_eq!(EstablishmentKind::from_order("0001"), EstablishmentKind::HeadOffice);
        assert_eq!(
            EstablishmentKind::from_order("0002"),
            EstablishmentKind::Branch { number: 2 }
        );
        assert_eq!(
            EstablishmentKind::from_order("9999"),
            EstablishmentKind::Branch { number: 9999 }
        );
        assert_eq!(EstablishmentKind::from_order("0000"), EstablishmentKind::Invalid);
        assert_eq!(EstablishmentKind::from_order("001"), EstablishmentKind::Invalid);
        assert_eq!(EstablishmentKind::from_order("+001"), EstablishmentKind::Invalid);
    }

    #[test]
    fn test_branch_number() {
        assert_eq!(EstablishmentKind::Branch { number: 7 }.branch_number(), Some(7));
        assert_eq!(EstablishmentKind::HeadOffice.branch_number(), None);
    }

    #[test]
    fn test_parts_from_canonical() {
        let parts = IdentifierParts::from_canonical("11222333000262").unwrap();
        assert_eq!(parts.root, "11222333");
        assert_eq!(parts.order, "0002");
        assert_eq!(parts.checksum, "62");
        assert_eq!(parts.establishment, EstablishmentKind::Branch { number: 2 });
        assert_eq!(parts.generation, Generation::Legacy);
        assert!(!parts.is_head_office());
        assert_eq!(parts.canonical(), "11222333000262");
        assert_eq!(parts.formatted(), "11.222.333/0002-62");
    }

    #[test]
    fn test_parts_require_fourteen_chars() {
        assert!(IdentifierParts::from_canonical("1122233300026").is_none());
        assert!(IdentifierParts::from_canonical("").is_none());
    }

    #[test]
    fn test_establishment_serialization() {
        let json = serde_json::to_string(&EstablishmentKind::Branch { number: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"branch","number":3}"#);

        let json = serde_json::to_string(&EstablishmentKind::HeadOffice).unwrap();
        assert_eq!(json, r#"{"kind":"head_office"}"#);
    }
}
