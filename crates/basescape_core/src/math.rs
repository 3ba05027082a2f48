//! Fixed-point math utilities for pointer mapping.
//!
//! Display scale correction is done in fixed-point so that the same
//! pointer position always maps to the same cell, whatever the platform.

use fixed::types::I32F32;

/// Fixed-point number type used for display scale math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Divide `numerator` by `denominator` and floor the quotient.
///
/// Rounds towards negative infinity, so `-1 / 32` is `-1`, not `0`.
/// Saturates to `i32::MIN`/`i32::MAX` when the quotient does not fit;
/// callers only ever compare the result against small grid bounds.
#[must_use]
pub fn floor_div(numerator: Fixed, denominator: Fixed) -> i32 {
    match numerator.checked_div(denominator) {
        Some(quotient) => quotient
            .checked_floor()
            .map_or(i32::MIN, |floored| floored.saturating_to_num::<i32>()),
        None if (numerator < Fixed::ZERO) == (denominator < Fixed::ZERO) => i32::MAX,
        None => i32::MIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(n: i32) -> Fixed {
        Fixed::from_num(n)
    }

    #[test]
    fn test_floor_div_exact() {
        assert_eq!(floor_div(fixed(96), fixed(32)), 3);
        assert_eq!(floor_div(fixed(0), fixed(32)), 0);
    }

    #[test]
    fn test_floor_div_rounds_down() {
        assert_eq!(floor_div(fixed(31), fixed(32)), 0);
        assert_eq!(floor_div(fixed(-1), fixed(32)), -1);
        assert_eq!(floor_div(fixed(-32), fixed(32)), -1);
        assert_eq!(floor_div(fixed(-33), fixed(32)), -2);
    }

    #[test]
    fn test_floor_div_fractional_denominator() {
        // 48 / (32 * 1.5) = 1
        let cell = fixed(32) * Fixed::from_num(1.5);
        assert_eq!(floor_div(fixed(48), cell), 1);
        assert_eq!(floor_div(fixed(47), cell), 0);
    }

    #[test]
    fn test_floor_div_saturates() {
        let tiny = Fixed::from_bits(1);
        assert_eq!(floor_div(fixed(i32::MAX), tiny), i32::MAX);
        assert_eq!(floor_div(fixed(-1000), tiny), i32::MIN);
    }
}
