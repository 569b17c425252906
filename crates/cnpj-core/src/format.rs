//! # Formatting
//!
//! Renders canonical candidates as `AA.AAA.AAA/NNNN-DD` and checks
//! human-facing renderings against that layout.
//!
//! ## Layout (0-based offsets)
//! ```text
//!   A A . A A A . A A A / N N N N - D D
//!   0 1 2 3 4 5 6 7 8 9 10  ...  15 16 17
//!       ▲       ▲       ▲          ▲
//!       '.'     '.'     '/'        '-'
//! ```

use crate::alphabet::Alphabet;
use crate::error::{ValidationError, ValidationWarning};
use crate::normalize::{is_separator, normalize};
use crate::types::EstablishmentKind;
use crate::{CNPJ_LENGTH, FORMATTED_LENGTH};

/// Separator offsets in the formatted layout.
const SEPARATORS: [(usize, char); 4] = [(2, '.'), (6, '.'), (10, '/'), (15, '-')];

/// Offsets of the order digits in the formatted layout.
const ORDER_OFFSETS: std::ops::Range<usize> = 11..15;

// =============================================================================
// Rendering
// =============================================================================

/// Renders a 14-character candidate with separators, valid or not.
///
/// Returns an empty string when the candidate is not 14 characters long.
///
/// ## Example
/// ```rust
/// use cnpj_core::format::format_canonical;
///
/// assert_eq!(format_canonical("11222333000181"), "11.222.333/0001-81");
/// assert_eq!(format_canonical("1122"), "");
/// ```
pub fn format_canonical(candidate: &str) -> String {
    let chars: Vec<char> = candidate.chars().collect();
    if chars.len() != CNPJ_LENGTH {
        return String::new();
    }

    let mut formatted = String::with_capacity(FORMATTED_LENGTH);
    for (index, c) in chars.into_iter().enumerate() {
        match index {
            2 | 5 => formatted.push('.'),
            8 => formatted.push('/'),
            12 => formatted.push('-'),
            _ => {}
        }
        formatted.push(c);
    }
    formatted
}

/// Normalizes then renders free-form input.
pub fn format(raw: &str, alphabet: Alphabet) -> String {
    format_canonical(&normalize(raw, alphabet))
}

// =============================================================================
// Layout Checker
// =============================================================================

/// Outcome of the formatted-layout checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl FormatReport {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks that `raw` is a well-formed `AA.AAA.AAA/NNNN-DD` rendering.
///
/// ## Rules
/// - Leading or trailing whitespace is only a warning
/// - Spaces, tabs and line breaks inside are errors
/// - Foreign characters, a bare canonical string or a wrong length stop the check
/// - Each misplaced separator is its own error
/// - Segment classes and the reserved order `0000` are checked last
pub fn check_format(raw: &str, alphabet: Alphabet) -> FormatReport {
    let mut report = FormatReport::default();

    if raw.is_empty() {
        report.errors.push(ValidationError::Empty);
        return report;
    }

    let trimmed = raw.trim();
    if trimmed.len() != raw.len() {
        report.warnings.push(ValidationWarning::SurroundingWhitespace);
    }

    if trimmed.contains(' ') {
        report.errors.push(ValidationError::EmbeddedSpace);
    }
    if trimmed.contains('\t') {
        report.errors.push(ValidationError::EmbeddedTab);
    }
    if trimmed.contains(|c| c == '\n' || c == '\r') {
        report.errors.push(ValidationError::EmbeddedLineBreak);
    }

    let mut foreign: Vec<char> = trimmed
        .chars()
        .filter(|&c| !alphabet.keeps(c) && !is_separator(c) && !c.is_whitespace())
        .collect();
    if !foreign.is_empty() {
        foreign.sort_unstable();
        foreign.dedup();
        report
            .errors
            .push(ValidationError::InvalidCharacters { chars: foreign });
        return report;
    }
    if !report.errors.is_empty() {
        return report;
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() == CNPJ_LENGTH && !chars.iter().any(|&c| is_separator(c)) {
        report.errors.push(ValidationError::MissingFormatting);
        return report;
    }
    if chars.len() != FORMATTED_LENGTH {
        report
            .errors
            .push(ValidationError::WrongFormattedLength { found: chars.len() });
        return report;
    }

    for (offset, expected) in SEPARATORS {
        if chars[offset] != expected {
            report.errors.push(ValidationError::MisplacedSeparator {
                expected,
                position: offset + 1,
                found: chars[offset],
            });
        }
    }
    if !report.errors.is_empty() {
        return report;
    }

    let segments_ok = chars.iter().enumerate().all(|(offset, &c)| match offset {
        2 | 6 | 10 | 15 => true,
        0..=9 => alphabet.keeps(c),
        _ => c.is_ascii_digit(),
    });
    if !segments_ok {
        report.errors.push(ValidationError::PatternMismatch);
        return report;
    }

    let order: String = chars[ORDER_OFFSETS].iter().collect();
    if EstablishmentKind::from_order(&order) == EstablishmentKind::Invalid {
        report.errors.push(ValidationError::ReservedOrder);
    }

    report
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_canonical() {
        assert_eq!(format_canonical("11222333000181"), "11.222.333/0001-81");
        assert_eq!(format_canonical("ABCDE123000166"), "AB.CDE.123/0001-66");
        // Validity is not checked
        assert_eq!(format_canonical("99999999999999"), "99.999.999/9999-99");
        assert_eq!(format_canonical("112223330001811"), "");
    }

    #[test]
    fn test_format_normalizes_first() {
        assert_eq!(
            format(" ab cde 123 0001 66", Alphabet::Alphanumeric),
            "AB.CDE.123/0001-66"
        );
        assert_eq!(format("ab cde 123 0001 66", Alphabet::Numeric), "");
    }

    #[test]
    fn test_well_formed() {
        let report = check_format("11.222.333/0001-81", Alphabet::Numeric);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());

        let report = check_format("AB.CDE.123/0001-66", Alphabet::Alphanumeric);
        assert!(report.is_valid());
    }

    #[test]
    fn test_surrounding_whitespace_is_a_warning() {
        let report = check_format("  11.222.333/0001-81\n", Alphabet::Numeric);
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec![ValidationWarning::SurroundingWhitespace]);
    }

    #[test]
    fn test_embedded_whitespace_is_fatal() {
        let report = check_format("11.222.333/0001 -81", Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::EmbeddedSpace]);

        let report = check_format("11.222.333/\t0001-81", Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::EmbeddedTab]);

        let report = check_format("11.222.333/\r\n0001-81", Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::EmbeddedLineBreak]);
    }

    #[test]
    fn test_foreign_characters_are_listed_sorted() {
        let report = check_format("11.222.333_0001#81!", Alphabet::Numeric);
        assert_eq!(
            report.errors,
            vec![ValidationError::InvalidCharacters {
                chars: vec!['!', '#', '_']
            }]
        );

        let report = check_format("AB.CDE.123/0001-66", Alphabet::Numeric);
        assert!(matches!(
            report.errors.as_slice(),
            [ValidationError::InvalidCharacters { .. }]
        ));
    }

    #[test]
    fn test_bare_canonical_is_missing_formatting() {
        let report = check_format("11222333000181", Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::MissingFormatting]);
    }

    #[test]
    fn test_wrong_length() {
        let report = check_format("11.222.333/0001-8", Alphabet::Numeric);
        assert_eq!(
            report.errors,
            vec![ValidationError::WrongFormattedLength { found: 17 }]
        );
    }

    #[test]
    fn test_each_misplaced_separator_is_reported() {
        let report = check_format("11-222.333.0001/81", Alphabet::Numeric);
        assert_eq!(
            report.errors,
            vec![
                ValidationError::MisplacedSeparator {
                    expected: '.',
                    position: 3,
                    found: '-'
                },
                ValidationError::MisplacedSeparator {
                    expected: '/',
                    position: 11,
                    found: '.'
                },
                ValidationError::MisplacedSeparator {
                    expected: '-',
                    position: 16,
                    found: '/'
                },
            ]
        );
    }

    #[test]
    fn test_letters_in_order_do_not_match_pattern() {
        let report = check_format("AB.CDE.123/00A1-66", Alphabet::Alphanumeric);
        assert_eq!(report.errors, vec![ValidationError::PatternMismatch]);
    }

    #[test]
    fn test_separator_inside_segment_does_not_match_pattern() {
        let report = check_format("11.2.2.333/0001-81", Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::PatternMismatch]);
    }

    #[test]
    fn test_reserved_order() {
        let report = check_format("11.222.333/0000-81", Alphabet::Numeric);
        assert_eq!(report.errors, vec![ValidationError::ReservedOrder]);
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            check_format("", Alphabet::Numeric).errors,
            vec![ValidationError::Empty]
        );
    }
}
