//! Field-level validation helpers shared by the entity forms.
//!
//! Length and format rules are declared on the forms with `validator`
//! derives (names up to 100 characters, phones up to 11); decimal bounds are
//! checked here because `validator` has no notion of `Decimal`.

use rust_decimal::Decimal;
use validator::Validate;

use crate::error::CoreError;

/// Decimal places stored for monetary columns (`NUMERIC(12, 2)`).
pub const MONEY_DECIMAL_PLACES: u32 = 2;
/// Digits allowed before the decimal point in a monetary column.
pub const MONEY_INTEGER_DIGITS: u32 = 10;

/// Reject negative monetary values.
pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CoreError::Validation(format!(
            "{field} must be greater than or equal to 0"
        )));
    }
    Ok(())
}

/// Check a monetary value against its column: non-negative, at most two
/// decimal places and at most ten integer digits.
///
/// Trailing zeros do not count towards the scale, so `"1.500"` is accepted.
pub fn ensure_money(field: &str, value: Decimal) -> Result<(), CoreError> {
    ensure_non_negative(field, value)?;
    if value.normalize().scale() > MONEY_DECIMAL_PLACES {
        return Err(CoreError::Validation(format!(
            "{field}: ensure that there are no more than {MONEY_DECIMAL_PLACES} decimal places"
        )));
    }
    if value.abs() >= Decimal::from(10_i64.pow(MONEY_INTEGER_DIGITS)) {
        return Err(CoreError::Validation(format!(
            "{field}: ensure that there are no more than {MONEY_INTEGER_DIGITS} digits before the decimal point"
        )));
    }
    Ok(())
}

/// Run the derived `validator` rules, converting failures to [`CoreError::Validation`].
pub fn validate_fields<T: Validate>(form: &T) -> Result<(), CoreError> {
    form.validate().map_err(CoreError::from)
}

/// Reduce a client-supplied file name to a safe basename.
///
/// Strips any directory components and replaces characters outside
/// `[A-Za-z0-9._-]` with `_`. Falls back to `document` when nothing usable
/// remains.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "document".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn non_negative_accepts_zero_and_positive() {
        assert!(ensure_non_negative("cost", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("cost", Decimal::from_str("-0.00").unwrap()).is_ok());
        assert!(ensure_non_negative("cost", Decimal::from_str("100.00").unwrap()).is_ok());
    }

    #[test]
    fn non_negative_rejects_negative() {
        let result = ensure_non_negative("budget", Decimal::from_str("-0.01").unwrap());
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.starts_with("budget"));
    }

    #[test]
    fn money_accepts_column_values() {
        assert!(ensure_money("cost", Decimal::from_str("100.01").unwrap()).is_ok());
        assert!(ensure_money("cost", Decimal::from_str("1.500").unwrap()).is_ok());
        assert!(ensure_money("cost", Decimal::from_str("9999999999.99").unwrap()).is_ok());
    }

    #[test]
    fn money_rejects_extra_decimal_places() {
        let result = ensure_money("cost", Decimal::from_str("100.005").unwrap());
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("decimal places"));
    }

    #[test]
    fn money_rejects_values_beyond_column_range() {
        let result = ensure_money("budget", Decimal::from_str("10000000000.00").unwrap());
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.starts_with("budget"));
    }

    #[test]
    fn money_rejects_negative_values() {
        assert_matches!(
            ensure_money("amount", Decimal::from_str("-1").unwrap()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\docs\\contract.pdf"), "contract.pdf");
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("my contract (v2).pdf"), "my_contract__v2_.pdf");
    }

    #[test]
    fn sanitize_falls_back_for_empty_names() {
        assert_eq!(sanitize_file_name(""), "document");
        assert_eq!(sanitize_file_name(".."), "document");
        assert_eq!(sanitize_file_name("dir/"), "document");
    }
}
