use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::utils::errors::UtilsError;

/// Exact value every equation evaluates to.
pub type Value = BigRational;

/// Parse a user supplied number such as `7`, `-3` or `3/4`.
///
/// # Errors
///
/// Returns an error if the text is not an integer or a fraction with a
/// non-zero denominator.
pub fn parse_number(text: &str) -> Result<Value, UtilsError> {
    let trimmed = text.trim();
    debug!("Parsing number '{}'", trimmed);

    if trimmed.is_empty() {
        return Err(UtilsError::InvalidNumber(text.to_string()));
    }

    // `Ratio::from_str` also accepts a leading '+', which never appears in
    // equation text, so keep the accepted alphabet to what we print.
    let valid_chars = trimmed
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == '/' || (c == '-' && i == 0));
    if !valid_chars {
        return Err(UtilsError::InvalidNumber(text.to_string()));
    }

    trimmed
        .parse::<Value>()
        .map_err(|_| UtilsError::InvalidNumber(text.to_string()))
}

/// Build a value from a machine integer.
pub fn integer(n: i64) -> Value {
    Value::from_integer(BigInt::from(n))
}

/// True when the value has denominator one.
pub fn is_integral(value: &Value) -> bool {
    value.denom().is_one()
}

/// Literals that need parentheses when they appear inside infix text.
pub fn needs_grouping(literal: &Value) -> bool {
    literal.is_negative() || !is_integral(literal)
}
