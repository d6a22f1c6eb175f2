//! Division and remainder.

use core::cmp::Ordering;

use crate::decimal::{Decimal, cmp_magnitude};
use crate::rescale::{MAX_SCALE, round_up, search_scale, unscale, unscale_from_overflow};
use crate::wide::{Divisor, MAX_LIMB_POWER, POWERS_10, U96};
use crate::{DecimalError, Result, fail};

/// Quotient at the natural scale `a.scale - b.scale`, extended digit by
/// digit while a remainder is left and the scale can still grow, then
/// rounded half-to-even on the last digit.
///
/// Quotients that needed extra digits are stripped of trailing zeros, so
/// `1 / 4` is `0.25` rather than `0.250000000`.
pub(crate) fn div(a: &Decimal, b: &Decimal) -> Result<Decimal> {
    if b.is_zero() {
        return Err(fail(DecimalError::DivideByZero, "div"));
    }
    let negative = a.negative != b.negative;
    let divisor = Divisor::new(&b.mantissa);

    let mut scale = a.scale as i32 - b.scale as i32;
    let (mut quotient, mut rem) = divisor.divide(&a.mantissa);
    let mut inexact = false;

    loop {
        let power = if rem == 0 {
            if scale >= 0 {
                break;
            }
            // Exact, but the scale is still negative.
            (-scale).min(MAX_LIMB_POWER as i32) as u32
        } else {
            inexact = true;
            let power = if scale == MAX_SCALE as i32 {
                0
            } else {
                search_scale(&quotient, scale)?
            };
            if power == 0 {
                if divisor.rounds_up(rem, quotient.lo() & 1 == 1) {
                    scale = round_up(&mut quotient, scale)?;
                }
                break;
            }
            power
        };

        let factor = POWERS_10[power as usize];
        scale += power as i32;
        if quotient.mul_small(factor) != 0 {
            return Err(fail(DecimalError::Overflow, "div"));
        }
        let (digits, next) = divisor.step(rem, factor);
        rem = next;
        if quotient.add_small(digits) {
            scale = unscale_from_overflow(&mut quotient, scale, rem != 0)?;
            break;
        }
    }

    debug_assert!((0..=MAX_SCALE as i32).contains(&scale));
    let mut scale = scale as u32;
    if inexact {
        scale = unscale(&mut quotient, scale);
    }
    Ok(Decimal::canonical(quotient, scale, negative))
}

/// Remainder of truncated division, exact, with the sign of `a` and the
/// larger of the two scales.
///
/// When `b` has the larger scale, `a`'s mantissa may not survive being scaled
/// up to it, so the remainder is scaled instead: `(a * 10^k) mod b` is
/// computed as `((a mod b) * 10^k) mod b`, nine digits at a time.
pub(crate) fn rem(a: &Decimal, b: &Decimal) -> Result<Decimal> {
    if b.is_zero() {
        return Err(fail(DecimalError::DivideByZero, "rem"));
    }
    if a.is_zero() {
        return Ok(*a);
    }

    let scale = a.scale.max(b.scale) as u32;
    match cmp_magnitude(a, b) {
        Ordering::Less => {
            // a * 10^k < b at the common scale, so this fits
            let mut mantissa = a.mantissa;
            let overflowed = mantissa.scale_up(scale - a.scale as u32);
            debug_assert!(!overflowed);
            return Ok(Decimal::from_raw_parts(mantissa, scale, a.negative));
        }
        Ordering::Equal => return Ok(Decimal::from_raw_parts(U96::ZERO, scale, a.negative)),
        Ordering::Greater => {}
    }

    let remainder = if a.scale >= b.scale {
        let mut aligned = b.mantissa;
        let overflowed = aligned.scale_up((a.scale - b.scale) as u32);
        debug_assert!(!overflowed);
        let divisor = Divisor::new(&aligned);
        let (_, rem) = divisor.divide(&a.mantissa);
        divisor.unshift(rem)
    } else {
        let divisor = Divisor::new(&b.mantissa);
        let (_, mut rem) = divisor.divide(&a.mantissa);
        let mut pending = (b.scale - a.scale) as u32;
        while pending > 0 {
            let step = pending.min(MAX_LIMB_POWER);
            (_, rem) = divisor.step(rem, POWERS_10[step as usize]);
            pending -= step;
        }
        divisor.unshift(rem)
    };
    Ok(Decimal::from_raw_parts(remainder, scale, a.negative))
}

#[cfg(test)]
mod div_tests {
    use super::*;

    fn dec(mantissa: i128, scale: u32) -> Decimal {
        Decimal::try_new(mantissa, scale).unwrap()
    }

    #[test]
    fn test_one_third() {
        let q = div(&Decimal::ONE, &dec(3, 0)).unwrap();
        assert_eq!(q.scale(), 28);
        assert_eq!(q.unsigned_mantissa(), 3_333_333_333_333_333_333_333_333_333);
    }

    #[test]
    fn test_two_thirds_rounds_up() {
        let q = div(&dec(2, 0), &dec(3, 0)).unwrap();
        assert_eq!(q.scale(), 28);
        assert_eq!(q.unsigned_mantissa(), 6_666_666_666_666_666_666_666_666_667);

        let q = div(&Decimal::ONE, &dec(7, 0)).unwrap();
        assert_eq!(q.unsigned_mantissa(), 1_428_571_428_571_428_571_428_571_429);
    }

    #[test]
    fn test_exact_keeps_natural_scale() {
        let q = div(&dec(100, 2), &Decimal::ONE).unwrap();
        assert_eq!(q.mantissa(), 100);
        assert_eq!(q.scale(), 2);

        let q = div(&dec(375, 3), &dec(15, 1)).unwrap();
        assert_eq!(q.mantissa(), 25);
        assert_eq!(q.scale(), 2);
    }

    #[test]
    fn test_extended_quotient_is_trimmed() {
        let q = div(&Decimal::ONE, &dec(4, 0)).unwrap();
        assert_eq!(q.mantissa(), 25);
        assert_eq!(q.scale(), 2);
    }

    #[test]
    fn test_negative_natural_scale() {
        let q = div(&dec(123_456_789, 0), &dec(1, 3)).unwrap();
        assert_eq!(q.mantissa(), 123_456_789_000);
        assert_eq!(q.scale(), 0);

        // 1 / 0.3
        let q = div(&Decimal::ONE, &dec(3, 1)).unwrap();
        assert_eq!(q.scale(), 28);
        assert_eq!(q.unsigned_mantissa(), 33_333_333_333_333_333_333_333_333_333);
    }

    #[test]
    fn test_inexact_at_very_negative_natural_scale() {
        // 1 / 0.0000000002
        let q = div(&Decimal::ONE, &dec(2, 10)).unwrap();
        assert_eq!(q.mantissa(), 5_000_000_000);
        assert_eq!(q.scale(), 0);

        // 1 / 3e-28
        let q = div(&Decimal::ONE, &dec(3, 28)).unwrap();
        assert_eq!(q.scale(), 1);
        assert_eq!(q.unsigned_mantissa(), 33_333_333_333_333_333_333_333_333_333);

        // 10 / 0.12345678901
        let q = div(&dec(10, 0), &dec(12_345_678_901, 11)).unwrap();
        assert_eq!(q.scale(), 26);
        assert_eq!(q.unsigned_mantissa(), 8_100_000_073_053_900_658_873_130_042);

        assert_eq!(
            div(&Decimal::MAX, &dec(3, 28)),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_large_quotient_rounds_at_scale_zero() {
        // (2^96 - 1) / 2 ties to even
        let q = div(&Decimal::MAX, &dec(2, 0)).unwrap();
        assert_eq!(q.scale(), 0);
        assert_eq!(q.unsigned_mantissa(), 39_614_081_257_132_168_796_771_975_168);

        let q = div(&dec(7 * 10i128.pow(28), 0), &dec(3, 0)).unwrap();
        assert_eq!(q.unsigned_mantissa(), 23_333_333_333_333_333_333_333_333_333);
        assert_eq!(q.scale(), 0);
    }

    #[test]
    fn test_wide_divisor() {
        let q = div(&Decimal::MAX, &dec(3, 0)).unwrap();
        assert_eq!(q.unsigned_mantissa(), 26_409_387_504_754_779_197_847_983_445);

        let a = dec((1 << 96) - 1, 28);
        let q = div(&a, &dec(98_765_432_109_876_543_210, 0)).unwrap();
        assert_eq!(q.scale(), 28);
        assert_eq!(q.unsigned_mantissa(), 802_185_145);
    }

    #[test]
    fn test_tiny_quotient_is_zero() {
        let q = div(&Decimal::ONE, &Decimal::MAX).unwrap();
        assert!(q.is_zero());
        assert!(q.is_sign_positive());
    }

    #[test]
    fn test_sign() {
        let q = div(&dec(-1, 0), &dec(8, 0)).unwrap();
        assert_eq!(q.mantissa(), -125);
        assert_eq!(q.scale(), 3);
        let q = div(&dec(-1, 0), &dec(-8, 0)).unwrap();
        assert_eq!(q.mantissa(), 125);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            div(&Decimal::ONE, &dec(0, 12)),
            Err(DecimalError::DivideByZero)
        );
        assert_eq!(
            div(&Decimal::MAX, &dec(1, 28)),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_zero_dividend() {
        let q = div(&dec(0, 5), &dec(3, 1)).unwrap();
        assert!(q.is_zero());
        assert_eq!(q.scale(), 4);
    }
}
