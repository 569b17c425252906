//! # Validator
//!
//! Composes normalizer, structural rules, checksum engine and layout checker
//! into one outcome.
//!
//! ## Validation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw input                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  structure::check ── errors? ──────────────────────────────┐           │
//! │      │ ok                                                   │           │
//! │      ▼                                                      │           │
//! │  check digits ── mismatch? ────────────────────────────────┤           │
//! │      │ ok                                                   │           │
//! │      ▼                                                      │           │
//! │  check_format (optional)                                    │           │
//! │  ├── input has separators → check the input itself          │           │
//! │  └── bare input           → check our rendering + warning   │           │
//! │      │                                                      ▼           │
//! │      └──────────────────────────────────────────► ValidationOutcome     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rand::Rng;
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::checksum;
use crate::error::{ValidationError, ValidationWarning};
use crate::format::{check_format, format, format_canonical};
use crate::generate::{generate_many, generate_with};
use crate::normalize::{has_separators, normalize};
use crate::structure;
use crate::types::{IdentifierParts, ValidationOutcome};
use crate::BASE_LENGTH;

/// Stateless CNPJ validator parametrized by alphabet.
///
/// `Copy`, `Send` and `Sync`: share it freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    alphabet: Alphabet,
    check_format: bool,
}

impl Default for Validator {
    /// Alphanumeric alphabet with the formatted-layout check enabled.
    fn default() -> Self {
        Validator::new(Alphabet::default())
    }
}

impl Validator {
    pub fn new(alphabet: Alphabet) -> Self {
        Validator {
            alphabet,
            check_format: true,
        }
    }

    /// Legacy digit-only validator.
    pub fn numeric() -> Self {
        Validator::new(Alphabet::Numeric)
    }

    /// Enables or disables the formatted-layout check in [`Validator::validate`].
    pub fn with_format_check(mut self, enabled: bool) -> Self {
        self.check_format = enabled;
        self
    }

    #[inline]
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    #[inline]
    pub fn checks_format(&self) -> bool {
        self.check_format
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Full validation of `text`.
    pub fn validate(&self, text: &str) -> ValidationOutcome {
        self.validate_opt(Some(text))
    }

    /// Full validation where absent input is a reported failure.
    pub fn validate_opt(&self, text: Option<&str>) -> ValidationOutcome {
        let report = structure::check(text, self.alphabet);
        let canonical = report.canonical;
        let mut errors = report.errors;
        let mut warnings = Vec::new();

        if errors.is_empty() {
            errors.extend(self.check_digits_error(&canonical));
        }

        let formatted = format_canonical(&canonical);

        if errors.is_empty() && self.check_format {
            if let Some(raw) = text {
                let layout = if has_separators(raw) {
                    check_format(raw, self.alphabet)
                } else {
                    warnings.push(ValidationWarning::Unformatted);
                    check_format(&formatted, self.alphabet)
                };
                errors.extend(layout.errors);
                warnings.extend(layout.warnings);
            }
        }

        let parts = IdentifierParts::from_canonical(&canonical);
        let valid = errors.is_empty();

        debug!(
            alphabet = %self.alphabet,
            valid,
            errors = errors.len(),
            warnings = warnings.len(),
            "validated CNPJ"
        );

        ValidationOutcome {
            valid,
            generation: parts.as_ref().map(|parts| parts.generation),
            canonical,
            formatted,
            alphabet: self.alphabet,
            parts,
            errors,
            warnings,
        }
    }

    /// Structural and checksum validity only. Never applies the layout check.
    pub fn is_valid(&self, text: &str) -> bool {
        let report = structure::check(Some(text), self.alphabet);
        report.is_valid() && checksum::verify(&report.canonical, self.alphabet)
    }

    /// Mismatch reason for a canonical candidate that passed the structural rules.
    fn check_digits_error(&self, canonical: &str) -> Option<ValidationError> {
        let (base, supplied) = canonical.split_at(BASE_LENGTH);
        match checksum::check_digits(base, self.alphabet) {
            Ok(expected) if expected.to_string() == supplied => None,
            Ok(expected) => Some(ValidationError::CheckDigitMismatch {
                expected: expected.to_string(),
                found: supplied.to_string(),
            }),
            Err(err) => Some(err.into()),
        }
    }

    // =========================================================================
    // Formatting & Parsing
    // =========================================================================

    /// Normalized candidate for this validator's alphabet.
    pub fn clean(&self, text: &str) -> String {
        normalize(text, self.alphabet)
    }

    /// `AA.AAA.AAA/NNNN-DD` rendering, or an empty string when the normalized
    /// candidate is not 14 characters long.
    pub fn format(&self, text: &str) -> String {
        format(text, self.alphabet)
    }

    /// Segments of `text`, valid or not. `None` on wrong length.
    pub fn extract_parts(&self, text: &str) -> Option<IdentifierParts> {
        IdentifierParts::from_canonical(&self.clean(text))
    }

    /// Segments of `text` only when it is fully valid.
    pub fn info(&self, text: &str) -> Option<IdentifierParts> {
        let outcome = self.validate(text);
        if outcome.valid {
            outcome.parts
        } else {
            None
        }
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Valid formatted head-office identifier, random root when `root` is `None`.
    pub fn generate(&self, root: Option<&str>) -> String {
        self.generate_with(&mut rand::thread_rng(), root)
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, root: Option<&str>) -> String {
        generate_with(rng, root, self.alphabet)
    }

    pub fn generate_many<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        root: Option<&str>,
    ) -> Vec<String> {
        generate_many(rng, count, root, self.alphabet)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Generation;
    use crate::types::EstablishmentKind;

    #[test]
    fn test_valid_formatted() {
        let outcome = Validator::default().validate("11.222.333/0001-81");
        assert!(outcome.valid);
        assert_eq!(outcome.canonical, "11222333000181");
        assert_eq!(outcome.formatted, "11.222.333/0001-81");
        assert_eq!(outcome.generation, Some(Generation::Legacy));
        assert_eq!(outcome.establishment(), Some(EstablishmentKind::HeadOffice));
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_bare_input_warns_but_passes() {
        let outcome = Validator::default().validate("11222333000181");
        assert!(outcome.valid);
        assert_eq!(outcome.warnings, vec![ValidationWarning::Unformatted]);
    }

    #[test]
    fn test_checksum_mismatch_reason() {
        let outcome = Validator::numeric().validate("11.222.333/0001-82");
        assert!(!outcome.valid);
        assert_eq!(
            outcome.errors,
            vec![ValidationError::CheckDigitMismatch {
                expected: "81".to_string(),
                found: "82".to_string()
            }]
        );
        assert_eq!(outcome.formatted, "11.222.333/0001-82");
        assert!(outcome.parts.is_some());
    }

    #[test]
    fn test_structural_errors_skip_checksum() {
        let outcome = Validator::default().validate("00.000.000/0000-00");
        assert_eq!(
            outcome.errors,
            vec![
                ValidationError::AllCharactersEqual,
                ValidationError::ReservedOrder
            ]
        );
    }

    #[test]
    fn test_layout_errors_from_formatted_input() {
        let outcome = Validator::default().validate("11.222.333.0001-81");
        assert!(!outcome.valid);
        assert_eq!(
            outcome.errors,
            vec![ValidationError::MisplacedSeparator {
                expected: '/',
                position: 11,
                found: '.'
            }]
        );
    }

    #[test]
    fn test_layout_check_can_be_disabled() {
        let validator = Validator::default().with_format_check(false);
        let outcome = validator.validate("11.222.333.0001-81");
        assert!(outcome.valid);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_missing_input() {
        let outcome = Validator::default().validate_opt(None);
        assert!(!outcome.valid);
        assert_eq!(outcome.canonical, "");
        assert_eq!(outcome.errors, vec![ValidationError::Missing]);
        assert!(outcome.parts.is_none());
    }

    #[test]
    fn test_is_valid_ignores_layout() {
        let validator = Validator::default();
        assert!(validator.is_valid("11 222 333 0001 81"));
        assert!(validator.is_valid("ab.cde.123/0001-66"));
        assert!(!validator.is_valid("00.000.000/0000-00"));
        assert!(!validator.is_valid(""));
    }

    #[test]
    fn test_numeric_validator_rejects_letter_roots() {
        assert!(!Validator::numeric().is_valid("AB.CDE.123/0001-66"));
    }

    #[test]
    fn test_info_only_for_valid() {
        let validator = Validator::default();
        let info = validator.info("12.ABC.34S/0001-11").unwrap();
        assert_eq!(info.generation, Generation::Alphanumeric);
        assert!(validator.info("12.ABC.34S/0001-12").is_none());
    }

    #[test]
    fn test_generated_identifiers_validate() {
        let validator = Validator::default();
        for _ in 0..50 {
            let generated = validator.generate(None);
            let outcome = validator.validate(&generated);
            assert!(outcome.valid, "{generated}: {:?}", outcome.errors);
        }
    }
}
