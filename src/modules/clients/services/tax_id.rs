//! Brazilian tax-ID (CPF/CNPJ) checksum validation and display formatting.
//!
//! Both documents carry two mod-11 check digits computed over weighted digit
//! sums; a remainder below 2 maps to check digit 0. Inputs are normalized by
//! stripping every non-digit character before any rule is applied.

use serde::{Deserialize, Serialize};

const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Kind of tax document detected by `validate_tax_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxIdKind {
    Cpf,
    Cnpj,
}

/// Outcome of validating a raw tax-ID string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxIdValidation {
    pub valid: bool,
    /// Set only when the document validated successfully
    pub kind: Option<TaxIdKind>,
}

fn digits_of(raw: &str) -> Vec<u32> {
    raw.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_identical(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn mod11_digit(weighted_sum: u32) -> u32 {
    let remainder = weighted_sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

/// Check digit for CPF: weights run from `top_weight` down to 2.
fn cpf_check_digit(digits: &[u32], top_weight: u32) -> u32 {
    let sum = digits
        .iter()
        .zip((2..=top_weight).rev())
        .map(|(d, w)| d * w)
        .sum();
    mod11_digit(sum)
}

/// Check digit for CNPJ over its fixed weight vector.
fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    mod11_digit(sum)
}

/// Validates a CPF (11 digits after stripping formatting).
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits = digits_of(raw);

    if digits.len() != 11 || all_identical(&digits) {
        return false;
    }

    digits[9] == cpf_check_digit(&digits[..9], 10)
        && digits[10] == cpf_check_digit(&digits[..10], 11)
}

/// Validates a CNPJ (14 digits after stripping formatting).
pub fn is_valid_cnpj(raw: &str) -> bool {
    let digits = digits_of(raw);

    if digits.len() != 14 || all_identical(&digits) {
        return false;
    }

    digits[12] == cnpj_check_digit(&digits[..12], &CNPJ_WEIGHTS_FIRST)
        && digits[13] == cnpj_check_digit(&digits[..13], &CNPJ_WEIGHTS_SECOND)
}

/// Classifies and validates a raw document string by digit count.
///
/// Lengths other than 11 or 14 are rejected before any checksum evaluation.
pub fn validate_tax_id(raw: &str) -> TaxIdValidation {
    let digits = digits_of(raw);

    match digits.len() {
        11 if is_valid_cpf(raw) => TaxIdValidation {
            valid: true,
            kind: Some(TaxIdKind::Cpf),
        },
        14 if is_valid_cnpj(raw) => TaxIdValidation {
            valid: true,
            kind: Some(TaxIdKind::Cnpj),
        },
        _ => TaxIdValidation {
            valid: false,
            kind: None,
        },
    }
}

/// Strips formatting, keeping only the digits of a document string.
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats a normalized document for display.
///
/// CPF becomes `XXX.XXX.XXX-XX`, CNPJ becomes `XX.XXX.XXX/XXXX-XX`. Strings
/// matching neither length are returned unchanged.
pub fn format_tax_id(raw: &str) -> String {
    let d = normalize_tax_id(raw);

    match d.len() {
        11 => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        ),
        _ => raw.to_string(),
    }
}
