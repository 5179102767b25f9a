//! Input boundary: operand parsing and expression detection.
//!
//! Everything typed by the user passes through here before reaching the
//! operation library, so malformed numbers surface as [`CalcError::Input`].

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{CalcError, Result};
use crate::plot::{Token, tokenize};

lazy_static! {
    /// Characters the expression grammar can use.
    static ref EXPRESSION_CHARS: Regex = Regex::new(
        r"^[\d\s.+\-*/%^()a-zA-Z_]+$"
    ).unwrap();
}

/// Parse one operand as a floating-point number.
///
/// Surrounding whitespace is ignored and `_` may separate digits
/// (`1_000`). `inf` and `nan` are accepted.
pub fn parse_operand(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::input("Please enter a valid number!"));
    }

    let cleaned = strip_digit_separators(trimmed)
        .ok_or_else(|| CalcError::input(format!("'{}' is not a valid number", trimmed)))?;

    cleaned
        .parse::<f64>()
        .map_err(|_| CalcError::input(format!("'{}' is not a valid number", trimmed)))
}

/// Parse exactly `count` operands.
pub fn parse_operands(raw: &[&str], count: usize) -> Result<Vec<f64>> {
    if raw.len() != count {
        return Err(CalcError::input(format!(
            "expected {} number(s), got {}",
            count,
            raw.len()
        )));
    }
    raw.iter().map(|r| parse_operand(r)).collect()
}

/// Remove `_` digit separators. `None` if an underscore is not between two digits.
fn strip_digit_separators(input: &str) -> Option<String> {
    if !input.contains('_') {
        return Some(input.to_string());
    }

    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).and_then(|j| chars.get(j));
            let after = chars.get(i + 1);
            match (before, after) {
                (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => continue,
                _ => return None,
            }
        }
        result.push(c);
    }
    Some(result)
}

/// Whether a line should be handed to the expression evaluator.
///
/// True when the line tokenizes and uses at least one operator or
/// parenthesis. A bare signed number (`-5`) is an operand, not an expression.
/// Lines that tokenize but fail to parse still count, so the parse error
/// reaches the user.
pub fn looks_like_expression(input: &str) -> bool {
    let trimmed = input.trim();
    if !EXPRESSION_CHARS.is_match(trimmed) {
        return false;
    }
    let Ok(tokens) = tokenize(trimmed) else {
        return false;
    };

    let tokens: Vec<&Token> = tokens
        .iter()
        .map(|spanned| &spanned.token)
        .filter(|token| **token != Token::Eof)
        .collect();
    match tokens.as_slice() {
        [Token::Minus | Token::Plus, Token::Number(_)] => false,
        tokens => tokens.iter().any(|token| token.is_operator()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_operand("42"), Ok(42.0));
        assert_eq!(parse_operand("  -3.5 "), Ok(-3.5));
        assert_eq!(parse_operand("1e3"), Ok(1000.0));
        assert_eq!(parse_operand(".5"), Ok(0.5));
        assert_eq!(parse_operand("1_000_000"), Ok(1_000_000.0));
    }

    #[test]
    fn test_parse_non_finite() {
        assert_eq!(parse_operand("inf"), Ok(f64::INFINITY));
        assert_eq!(parse_operand("-inf"), Ok(f64::NEG_INFINITY));
        assert!(parse_operand("nan").unwrap().is_nan());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "   ", "abc", "1,5", "12abc", "_1", "1__0", "1_", "--1"] {
            assert!(
                matches!(parse_operand(raw), Err(CalcError::Input(_))),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_operands_checks_count() {
        assert_eq!(parse_operands(&["1", "2"], 2), Ok(vec![1.0, 2.0]));
        assert!(matches!(
            parse_operands(&["1"], 2),
            Err(CalcError::Input(_))
        ));
        assert!(matches!(
            parse_operands(&["1", "x"], 2),
            Err(CalcError::Input(_))
        ));
    }

    #[test]
    fn test_plain_numbers_rejected() {
        assert!(!looks_like_expression("123"));
        assert!(!looks_like_expression("42.5"));
        assert!(!looks_like_expression("-123"));
        assert!(!looks_like_expression("1_234_567"));
        assert!(!looks_like_expression("  42  "));
    }

    #[test]
    fn test_expressions_accepted() {
        assert!(looks_like_expression("2+2"));
        assert!(looks_like_expression("2 + 2"));
        assert!(looks_like_expression("10 * 5"));
        assert!(looks_like_expression("100 / 4"));
        assert!(looks_like_expression("2^8"));
        assert!(looks_like_expression("2**8"));
        assert!(looks_like_expression("10 % 3"));
        assert!(looks_like_expression("(2 + 3) * 4"));
        assert!(looks_like_expression("10 - 5"));
    }

    #[test]
    fn test_functions_accepted() {
        assert!(looks_like_expression("sin(0)"));
        assert!(looks_like_expression("sqrt (16)"));
        assert!(looks_like_expression("abs(-5)"));
        assert!(looks_like_expression("ln(e)"));
    }

    #[test]
    fn test_commands_rejected() {
        assert!(!looks_like_expression(""));
        assert!(!looks_like_expression("a"));
        assert!(!looks_like_expression("history"));
        assert!(!looks_like_expression("add 1 2"));
        assert!(!looks_like_expression("export out.txt"));
        assert!(!looks_like_expression("launch firefox"));
    }

    #[test]
    fn test_incomplete_expressions_accepted() {
        // Still routed to the evaluator, which reports where parsing failed.
        assert!(looks_like_expression("1 +"));
        assert!(looks_like_expression("(2"));
    }
}
