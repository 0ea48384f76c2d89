//! pt-BR number formatting.

use bigdecimal::{BigDecimal, RoundingMode};

/// Formats an amount as Brazilian reais: `R$ 1.234,56`.
///
/// Always two decimals, halves rounded away from zero. Negative amounts put the
/// sign before the currency symbol.
pub fn format_brl(amount: &BigDecimal) -> String {
    let fixed = amount
        .with_scale_round(2, RoundingMode::HalfUp)
        .to_string();
    let (negative, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    format!(
        "{}R$ {},{}",
        if negative { "-" } else { "" },
        group_thousands(int_part),
        frac_part
    )
}

/// Groups a count with `.` separators: `12500` -> `12.500`.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    if value < 0 {
        format!("-{}", group_thousands(&digits))
    } else {
        group_thousands(&digits)
    }
}

pub fn format_percent(score: i32) -> String {
    format!("{}%", score)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn brl(raw: &str) -> String {
        format_brl(&BigDecimal::from_str(raw).unwrap())
    }

    #[test]
    fn test_brl_formatting() {
        assert_eq!(brl("0"), "R$ 0,00");
        assert_eq!(brl("5"), "R$ 5,00");
        assert_eq!(brl("450.75"), "R$ 450,75");
        assert_eq!(brl("1234.5"), "R$ 1.234,50");
        assert_eq!(brl("15000"), "R$ 15.000,00");
        assert_eq!(brl("1234567.891"), "R$ 1.234.567,89");
        assert_eq!(brl("-1200"), "-R$ 1.200,00");
    }

    #[test]
    fn test_brl_rounds_halves_away_from_zero() {
        assert_eq!(brl("0.125"), "R$ 0,13");
        assert_eq!(brl("0.135"), "R$ 0,14");
        assert_eq!(brl("2.675"), "R$ 2,68");
        assert_eq!(brl("-0.125"), "-R$ 0,13");
        assert_eq!(brl("0.124"), "R$ 0,12");
    }

    #[test]
    fn test_count_formatting() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(12500), "12.500");
        assert_eq!(format_count(1_000_000), "1.000.000");
        assert_eq!(format_count(-4200), "-4.200");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(82), "82%");
    }
}
