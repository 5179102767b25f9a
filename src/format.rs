//! Number formatting for history entries, the result display and the clipboard.

/// Format a real number the way history entries show operands and results.
///
/// Whole numbers keep a trailing `.0` (`7.0`), other values use the shortest
/// representation that round-trips, and non-finite values print as
/// `inf`, `-inf` and `nan`. Exponents carry a sign and at least two digits
/// (`1e+20`, `1e-07`).
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() { "inf" } else { "-inf" };
        return text.to_string();
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Format a number for display with thousand separators.
///
/// Non-finite values are spelled out instead of being formatted.
pub fn format_display(value: f64) -> String {
    if value.is_nan() {
        return "Not a Number".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        }
        .to_string();
    }

    let raw = format_clipboard(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    match unsigned.find('.') {
        Some(dot_pos) => {
            let (int_part, dec_part) = unsigned.split_at(dot_pos);
            format!("{}{}{}", sign, group_digits(int_part), dec_part)
        }
        None => format!("{}{}", sign, group_digits(unsigned)),
    }
}

/// Format a number for clipboard (raw number, no separators).
pub fn format_clipboard(value: f64) -> String {
    if !value.is_finite() {
        return format_real(value);
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Insert a comma between every group of three digits, counting from the right.
pub fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_keeps_trailing_zero() {
        assert_eq!(format_real(7.0), "7.0");
        assert_eq!(format_real(-2.5), "-2.5");
        assert_eq!(format_real(0.1), "0.1");
    }

    #[test]
    fn test_real_exponent_form() {
        assert_eq!(format_real(1e16), "1e+16");
        assert_eq!(format_real(1e20), "1e+20");
        assert_eq!(format_real(-2.5e20), "-2.5e+20");
        assert_eq!(format_real(1e-7), "1e-07");
        assert_eq!(format_real(1.5e300), "1.5e+300");
        assert_eq!(format_real(1e15), "1000000000000000.0");
        assert_eq!(format_real(0.0001), "0.0001");
    }

    #[test]
    fn test_real_non_finite() {
        assert_eq!(format_real(f64::INFINITY), "inf");
        assert_eq!(format_real(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_real(f64::NAN), "nan");
    }

    #[test]
    fn test_thousand_separators() {
        assert_eq!(format_display(1_000_000.0), "1,000,000");
        assert_eq!(format_display(-1234.5), "-1,234.5");
        assert_eq!(format_display(999.0), "999");
    }

    #[test]
    fn test_negative_fraction_keeps_sign() {
        assert_eq!(format_display(-0.5), "-0.5");
        assert_eq!(format_clipboard(-0.5), "-0.5");
    }

    #[test]
    fn test_large_values_are_grouped() {
        assert_eq!(format_display(1e20), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_clipboard_is_raw() {
        assert_eq!(format_clipboard(1_000_000.0), "1000000");
        assert!(format_clipboard(1.0 / 3.0).starts_with("0.333"));
    }

    #[test]
    fn test_display_non_finite() {
        assert_eq!(format_display(f64::INFINITY), "Infinity");
        assert_eq!(format_display(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_display(f64::NAN), "Not a Number");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1"), "1");
        assert_eq!(group_digits("1234"), "1,234");
        assert_eq!(group_digits("123456"), "123,456");
    }
}
