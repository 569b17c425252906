//! # Structural Validator
//!
//! Grammar rules over a canonical candidate.
//!
//! ## Rule Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Emptiness          ── fail → stop                                   │
//! │  2. Length == 14       ── fail → stop                                   │
//! │  3. Character classes  ┐                                                │
//! │     root / order / dv  │                                                │
//! │  4. Not all equal      ├── failures accumulate, reported together       │
//! │  5. Order != 0000      ┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Letters are never accepted in the order or check digit segments, even
//! under the alphanumeric alphabet.

use tracing::trace;

use crate::alphabet::Alphabet;
use crate::error::ValidationError;
use crate::normalize::normalize;
use crate::types::EstablishmentKind;
use crate::{BASE_LENGTH, CNPJ_LENGTH, ROOT_LENGTH};

/// Outcome of the structural rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    /// Normalized candidate the rules ran against.
    pub canonical: String,
    pub errors: Vec<ValidationError>,
    /// Set whenever the order segment is numeric.
    pub establishment: Option<EstablishmentKind>,
}

impl StructureReport {
    fn rejected(canonical: String, error: ValidationError) -> Self {
        StructureReport {
            canonical,
            errors: vec![error],
            establishment: None,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Normalizes raw input and runs the structural rules.
///
/// `None` models absent input and is reported, never panicked on.
pub fn check(raw: Option<&str>, alphabet: Alphabet) -> StructureReport {
    match raw {
        None => StructureReport::rejected(String::new(), ValidationError::Missing),
        Some("") => StructureReport::rejected(String::new(), ValidationError::Empty),
        Some(raw) => check_candidate(&normalize(raw, alphabet), alphabet),
    }
}

/// Runs the structural rules over an already normalized candidate.
pub fn check_candidate(candidate: &str, alphabet: Alphabet) -> StructureReport {
    let chars: Vec<char> = candidate.chars().collect();
    let canonical = candidate.to_string();

    if chars.is_empty() {
        return StructureReport::rejected(canonical, ValidationError::WrongLength { found: 0 });
    }
    if chars.len() != CNPJ_LENGTH {
        return StructureReport::rejected(
            canonical,
            ValidationError::WrongLength { found: chars.len() },
        );
    }

    let root = &chars[..ROOT_LENGTH];
    let order = &chars[ROOT_LENGTH..BASE_LENGTH];
    let digits = &chars[BASE_LENGTH..];
    let mut errors = Vec::new();

    let mut invalid_root: Vec<char> = Vec::new();
    for &c in root {
        if !alphabet.accepts_root(c) && !invalid_root.contains(&c) {
            invalid_root.push(c);
        }
    }
    if !invalid_root.is_empty() {
        errors.push(ValidationError::InvalidRootCharacters {
            chars: invalid_root,
        });
    }

    let order_numeric = order.iter().all(char::is_ascii_digit);
    if !order_numeric {
        errors.push(ValidationError::NonNumericOrder {
            order: order.iter().collect(),
        });
    }

    if !digits.iter().all(char::is_ascii_digit) {
        errors.push(ValidationError::NonNumericCheckDigits {
            digits: digits.iter().collect(),
        });
    }

    if chars.iter().all(|&c| c == chars[0]) {
        errors.push(ValidationError::AllCharactersEqual);
    }

    let establishment = if order_numeric {
        let order: String = order.iter().collect();
        let kind = EstablishmentKind::from_order(&order);
        if kind == EstablishmentKind::Invalid {
            errors.push(ValidationError::ReservedOrder);
        }
        Some(kind)
    } else {
        None
    };

    trace!(
        %alphabet,
        errors = errors.len(),
        ?establishment,
        "structural rules evaluated"
    );

    StructureReport {
        canonical,
        errors,
        establishment,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_structure() {
        let report = check(Some("11.222.333/0001-81"), Alphabet::Numeric);
        assert!(report.is_valid());
        assert_eq!(report.canonical, "11222333000181");
        assert_eq!(report.establishment, Some(EstablishmentKind::HeadOffice));
    }

    #[test]
    fn test_missing_and_empty() {
        let report = check(None, Alphabet::Alphanumeric);
        assert_eq!(report.errors, vec![ValidationError::Missing]);
        assert_eq!(report.canonical, "");

        let report = check(Some(""), Alphabet::Alphanumeric);
        assert_eq!(report.errors, vec![ValidationError::Empty]);
    }

    #[test]
    fn test_length_short_circuits() {
        let report = check(Some("11.222.333/0001-8"), Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::WrongLength { found: 13 }]);

        let report = check(Some("...///"), Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::WrongLength { found: 0 }]);
    }

    #[test]
    fn test_numeric_normalizer_drops_letters_before_length() {
        let report = check(Some("AB.222.333/0001-81"), Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::WrongLength { found: 12 }]);
    }

    #[test]
    fn test_letters_in_order_and_digits_accumulate() {
        let report = check(Some("AB.CDE.123/00A1-9Z"), Alphabet::Alphanumeric);
        assert_eq!(
            report.errors,
            vec![
                ValidationError::NonNumericOrder {
                    order: "00A1".to_string()
                },
                ValidationError::NonNumericCheckDigits {
                    digits: "9Z".to_string()
                },
            ]
        );
        assert_eq!(report.establishment, None);
    }

    #[test]
    fn test_invalid_root_characters_are_named() {
        let report = check_candidate("1a2#2#33000181", Alphabet::Alphanumeric);
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidRootCharacters {
                chars: vec!['a', '#']
            }]
        );

        let report = check_candidate("AB222333000181", Alphabet::Numeric);
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidRootCharacters {
                chars: vec!['A', 'B']
            }]
        );
    }

    #[test]
    fn test_all_equal_rejected() {
        let report = check(Some("11111111111111"), Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::AllCharactersEqual]);
    }

    #[test]
    fn test_zero_identifier_reports_every_failure() {
        let report = check(Some("00.000.000/0000-00"), Alphabet::Numeric);
        assert_eq!(
            report.errors,
            vec![
                ValidationError::AllCharactersEqual,
                ValidationError::ReservedOrder
            ]
        );
        assert_eq!(report.establishment, Some(EstablishmentKind::Invalid));
    }

    #[test]
    fn test_branch_classification() {
        let report = check(Some("11.222.333/0002-62"), Alphabet::Alphanumeric);
        assert!(report.is_valid());
        assert_eq!(
            report.establishment,
            Some(EstablishmentKind::Branch { number: 2 })
        );
    }

    #[test]
    fn test_digit_only_root_accepted_by_alphanumeric() {
        assert!(check(Some("11222333000181"), Alphabet::Alphanumeric).is_valid());
    }
}
