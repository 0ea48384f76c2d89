//! CPF (national individual tax id) handling.
//!
//! The query key is whatever the user typed reduced to its digits. Exactly 11 digits
//! are required; no check-digit validation is performed client-side.

use crate::errors::{ClientError, INVALID_CPF_MESSAGE};
use std::fmt;

pub const CPF_LEN: usize = 11;

/// Strips every non-digit character.
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats up to 11 digits progressively as `000.000.000-00`.
///
/// Partial input is grouped as far as it goes (`1234` -> `123.4`). Anything past
/// the eleventh digit is dropped.
pub fn format_partial(raw: &str) -> String {
    let digits: String = strip_non_digits(raw).chars().take(CPF_LEN).collect();
    let len = digits.len();

    match len {
        0..=3 => digits,
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        _ => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..]
        ),
    }
}

/// A validated 11-digit identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Accepts any input that reduces to exactly 11 digits.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let digits = strip_non_digits(raw);
        if digits.len() != CPF_LEN {
            return Err(ClientError::Validation(INVALID_CPF_MESSAGE.to_string()));
        }
        Ok(Cpf(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn formatted(&self) -> String {
        format_partial(&self.0)
    }

    /// Log-safe form: keeps the first three and last two digits.
    pub fn masked(&self) -> String {
        format!("{}.***.***-{}", &self.0[..3], &self.0[9..])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Text input state of the search field.
///
/// Holds digits only. An edit that would push the field past 11 digits is
/// rejected and the previous value kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpfInput {
    digits: String,
}

impl CpfInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the field content. Returns false when the edit was rejected.
    pub fn set(&mut self, raw: &str) -> bool {
        let digits = strip_non_digits(raw);
        if digits.len() > CPF_LEN {
            return false;
        }
        self.digits = digits;
        true
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// What the field shows.
    pub fn display(&self) -> String {
        format_partial(&self.digits)
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == CPF_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_formatting() {
        let cpf = Cpf::parse("123.456.789-01").unwrap();
        assert_eq!(cpf.digits(), "12345678901");
        assert_eq!(cpf.formatted(), "123.456.789-01");
        assert_eq!(cpf.to_string(), "123.456.789-01");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        for raw in ["", "1234567890", "123456789012", "abc", "123.456.789-0"] {
            match Cpf::parse(raw) {
                Err(ClientError::Validation(msg)) => assert_eq!(msg, INVALID_CPF_MESSAGE),
                other => panic!("expected validation error for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_progressive_format() {
        assert_eq!(format_partial(""), "");
        assert_eq!(format_partial("123"), "123");
        assert_eq!(format_partial("1234"), "123.4");
        assert_eq!(format_partial("123456"), "123.456");
        assert_eq!(format_partial("1234567"), "123.456.7");
        assert_eq!(format_partial("1234567890"), "123.456.789-0");
        assert_eq!(format_partial("123456789012345"), "123.456.789-01");
    }

    #[test]
    fn test_masked_hides_middle_digits() {
        let cpf = Cpf::parse("12345678901").unwrap();
        assert_eq!(cpf.masked(), "123.***.***-01");
    }

    #[test]
    fn test_input_rejects_overflowing_edit() {
        let mut input = CpfInput::new();
        assert!(input.set("123.456.789-01"));
        assert!(input.is_complete());
        assert!(!input.set("123456789012"));
        assert_eq!(input.digits(), "12345678901");
        assert_eq!(input.display(), "123.456.789-01");

        assert!(input.set("98a7"));
        assert_eq!(input.digits(), "987");
        assert!(!input.is_complete());
    }
}
