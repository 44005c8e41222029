use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Canonical true: all bits set.
pub const TRUE: i64 = -1;
/// Canonical false.
pub const FALSE: i64 = 0;

/// Encodes a boolean as a canonical integer, `-1` for true and `0` for false.
///
/// ## Example
/// ```
/// use falsey::util::num::bool_to_int;
///
/// assert_eq!(bool_to_int(3 > 2) & 7, 7);
/// assert_eq!(bool_to_int(false), 0);
/// ```
#[must_use]
pub const fn bool_to_int(value: bool) -> i64 {
    if value { TRUE } else { FALSE }
}

/// Divides `a` by `b`, rounding toward negative infinity.
///
/// ## Errors
/// - `DivisionByZero` if `b` is zero.
/// - `Overflow` for `i64::MIN / -1`.
///
/// ## Example
/// ```
/// use falsey::util::num::floor_div;
///
/// assert_eq!(floor_div(-7, 2, 1).unwrap(), -4);
/// assert_eq!(floor_div(7, -2, 1).unwrap(), -4);
/// assert_eq!(floor_div(-7, -2, 1).unwrap(), 3);
/// assert!(floor_div(1, 0, 1).is_err());
/// ```
pub fn floor_div(a: i64, b: i64, line: usize) -> EvalResult<i64> {
    if b == 0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    let quotient = a.checked_div(b)
                    .ok_or(RuntimeError::Overflow { op: '/', line })?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Converts a stack integer to the character it encodes.
///
/// ## Errors
/// Returns `InvalidCharacter` for negative values, values above `0x10FFFF`,
/// and surrogate code points.
///
/// ## Example
/// ```
/// use falsey::util::num::code_to_char;
///
/// assert_eq!(code_to_char(65, 1).unwrap(), 'A');
/// assert!(code_to_char(-1, 1).is_err());
/// ```
pub fn code_to_char(code: i64, line: usize) -> EvalResult<char> {
    u32::try_from(code).ok()
                       .and_then(char::from_u32)
                       .ok_or(RuntimeError::InvalidCharacter { code, line })
}

/// Checks a pick index against the current stack depth.
///
/// ## Errors
/// Returns `IndexOutOfRange` if `index` is negative or not below `depth`.
pub fn pick_index(index: i64, depth: usize, line: usize) -> EvalResult<usize> {
    usize::try_from(index).ok()
                          .filter(|&i| i < depth)
                          .ok_or(RuntimeError::IndexOutOfRange { index, depth, line })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_division_matches_truncation_for_same_signs() {
        assert_eq!(floor_div(7, 2, 1).unwrap(), 3);
        assert_eq!(floor_div(-8, 2, 1).unwrap(), -4);
        assert_eq!(floor_div(0, -3, 1).unwrap(), 0);
    }

    #[test]
    fn floor_division_overflow_is_reported() {
        assert!(matches!(floor_div(i64::MIN, -1, 9),
                         Err(RuntimeError::Overflow { op: '/', line: 9 })));
    }

    #[test]
    fn surrogates_are_not_characters() {
        assert!(code_to_char(0xD800, 1).is_err());
        assert_eq!(code_to_char(0x1F600, 1).unwrap(), '😀');
    }

    #[test]
    fn pick_index_bounds() {
        assert_eq!(pick_index(0, 1, 1).unwrap(), 0);
        assert!(pick_index(1, 1, 1).is_err());
        assert!(pick_index(-1, 5, 1).is_err());
    }
}
