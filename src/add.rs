//! Addition and subtraction with scale alignment.

use core::cmp::Ordering;

use crate::Result;
use crate::decimal::Decimal;
use crate::rescale::{scale_result, unscale_from_overflow};
use crate::wide::{U96, U192};

/// `a + b`, or `a - b` when `subtract` is set.
///
/// Operands at the same scale are combined in 96 bits. Otherwise the
/// smaller-scale mantissa is scaled up in a 192-bit buffer, which always has
/// room for a 28-digit alignment, and the exact result is brought back into
/// 96 bits by [`scale_result`].
pub(crate) fn add_sub(a: &Decimal, b: &Decimal, subtract: bool) -> Result<Decimal> {
    let b_negative = b.negative != subtract;

    if b.is_zero() {
        return Ok(*a);
    }
    if a.is_zero() {
        return Ok(Decimal::from_raw_parts(b.mantissa, b.scale as u32, b_negative));
    }

    if a.scale == b.scale {
        return add_aligned(a.mantissa, a.negative, b.mantissa, b_negative, a.scale as u32);
    }

    // x is the operand with the smaller scale
    let (x, x_negative, y, y_negative) = if a.scale < b.scale {
        (&a.mantissa, a.negative, &b.mantissa, b_negative)
    } else {
        (&b.mantissa, b_negative, &a.mantissa, a.negative)
    };
    let scale = a.scale.max(b.scale) as u32;
    let diff = scale - a.scale.min(b.scale) as u32;

    let mut scaled: U192 = x.widen();
    // 2^96 * 10^28 < 2^190
    let overflowed = scaled.scale_up(diff);
    debug_assert!(!overflowed);
    let other: U192 = y.widen();

    let (mut sum, negative) = if x_negative == y_negative {
        scaled.add_assign_carry(&other);
        (scaled, x_negative)
    } else {
        match scaled.cmp(&other) {
            Ordering::Equal => return Ok(Decimal::from_raw_parts(U96::ZERO, scale, false)),
            Ordering::Greater => {
                scaled.sub_assign_borrow(&other);
                (scaled, x_negative)
            }
            Ordering::Less => {
                let mut rest = other;
                rest.sub_assign_borrow(&scaled);
                (rest, y_negative)
            }
        }
    };

    match sum.narrow() {
        Some(mantissa) => Ok(Decimal::canonical(mantissa, scale, negative)),
        None => {
            let (mantissa, scale) = scale_result(&mut sum, scale as i32)?;
            Ok(Decimal::canonical(mantissa, scale, negative))
        }
    }
}

/// Same-scale case. A carry out of 96 bits costs one digit of scale.
fn add_aligned(mut x: U96, x_negative: bool, y: U96, y_negative: bool, scale: u32) -> Result<Decimal> {
    if x_negative == y_negative {
        if x.add_assign_carry(&y) {
            let scale = unscale_from_overflow(&mut x, scale as i32, false)?;
            return Ok(Decimal::from_raw_parts(x, scale as u32, x_negative));
        }
        return Ok(Decimal::canonical(x, scale, x_negative));
    }

    let mut negative = x_negative;
    if x.sub_assign_borrow(&y) {
        x.negate();
        negative = !negative;
    }
    Ok(Decimal::canonical(x, scale, negative))
}

#[cfg(test)]
mod add_tests {
    use super::*;
    use crate::DecimalError;

    fn dec(mantissa: i128, scale: u32) -> Decimal {
        Decimal::try_new(mantissa, scale).unwrap()
    }

    #[test]
    fn test_one_plus_one() {
        let sum = add_sub(&Decimal::ONE, &Decimal::ONE, false).unwrap();
        assert_eq!(sum.mantissa(), 2);
        assert_eq!(sum.scale(), 0);
    }

    #[test]
    fn test_tenths_exact() {
        let sum = add_sub(&dec(1, 1), &dec(2, 1), false).unwrap();
        assert_eq!(sum.mantissa(), 3);
        assert_eq!(sum.scale(), 1);
    }

    #[test]
    fn test_max_plus_one_overflows() {
        assert_eq!(
            add_sub(&Decimal::MAX, &Decimal::ONE, false),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            add_sub(&Decimal::MIN, &Decimal::ONE, true),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_zero_operand_returns_other() {
        let a = dec(-12_345, 3);
        let zero = dec(0, 20);
        let sum = add_sub(&a, &zero, false).unwrap();
        assert_eq!(sum.to_words(), a.to_words());

        let diff = add_sub(&zero, &a, true).unwrap();
        assert_eq!(diff.mantissa(), 12_345);
        assert_eq!(diff.scale(), 3);
    }

    #[test]
    fn test_subtraction_crosses_zero() {
        let diff = add_sub(&dec(15, 1), &dec(4, 0), true).unwrap();
        assert_eq!(diff.mantissa(), -25);
        assert_eq!(diff.scale(), 1);

        let diff = add_sub(&dec(3, 0), &dec(45, 1), true).unwrap();
        assert_eq!(diff.mantissa(), -15);
    }

    #[test]
    fn test_difference_to_zero_is_positive() {
        let diff = add_sub(&dec(-5, 1), &dec(-50, 2), true).unwrap();
        assert!(diff.is_zero());
        assert!(diff.is_sign_positive());
        assert_eq!(diff.scale(), 2);

        let diff = add_sub(&dec(-7, 2), &dec(-7, 2), true).unwrap();
        assert!(diff.is_sign_positive());
    }

    #[test]
    fn test_alignment_keeps_larger_scale() {
        let sum = add_sub(&dec(1, 0), &dec(1, 28), false).unwrap();
        assert_eq!(sum.mantissa(), 10i128.pow(28) + 1);
        assert_eq!(sum.scale(), 28);
    }

    #[test]
    fn test_aligned_carry_rounds_half_even() {
        // (2^96 - 1) + 5 at scale 1 = 79228162514264337593543950340 -> /10 exact
        let sum = add_sub(&Decimal::try_new((1 << 96) - 1, 1).unwrap(), &dec(5, 1), false).unwrap();
        assert_eq!(sum.scale(), 0);
        assert_eq!(sum.unsigned_mantissa(), 7_922_816_251_426_433_759_354_395_034);

        // (2^96 - 1) + 6 = ...341 -> digit 1 rounds down
        let sum = add_sub(&Decimal::try_new((1 << 96) - 1, 1).unwrap(), &dec(6, 1), false).unwrap();
        assert_eq!(sum.unsigned_mantissa(), 7_922_816_251_426_433_759_354_395_034);
    }

    #[test]
    fn test_wide_alignment_rounds() {
        // MAX - 0.5 needs 100 bits at scale 1 -> back to scale 0, half to even
        let sum = add_sub(&Decimal::MAX, &dec(5, 1), true).unwrap();
        // 79228162514264337593543950334.5 -> ...334 (even)
        assert_eq!(sum.unsigned_mantissa(), 79_228_162_514_264_337_593_543_950_334);
        assert_eq!(sum.scale(), 0);

        let sum = add_sub(&dec(79_228_162_514_264_337_593_543_950_334, 0), &dec(5, 1), false).unwrap();
        assert_eq!(sum.unsigned_mantissa(), 79_228_162_514_264_337_593_543_950_334);

        let sum = add_sub(&dec(79_228_162_514_264_337_593_543_950_334, 0), &dec(51, 2), false).unwrap();
        assert_eq!(sum.unsigned_mantissa(), 79_228_162_514_264_337_593_543_950_335);
    }

    #[test]
    fn test_max_plus_small_fraction_overflows_only_when_rounding_up() {
        assert_eq!(
            add_sub(&Decimal::MAX, &dec(6, 1), false),
            Err(DecimalError::Overflow)
        );
        let sum = add_sub(&Decimal::MAX, &dec(4, 1), false).unwrap();
        assert_eq!(sum, Decimal::MAX);
    }

    #[test]
    fn test_mixed_sign_alignment() {
        let diff = add_sub(&dec(1, 0), &dec(1, 28), true).unwrap();
        assert_eq!(diff.mantissa(), 10i128.pow(28) - 1);
        assert_eq!(diff.scale(), 28);

        let sum = add_sub(&dec(-1, 0), &dec(1, 28), false).unwrap();
        assert_eq!(sum.mantissa(), -(10i128.pow(28) - 1));
    }
}
