//! Rounding to a target number of decimal places.

use crate::decimal::Decimal;
use crate::wide::{MAX_LIMB_POWER, POWERS_10, U96};

/// How a value is rounded when decimal places are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round to nearest, ties to even (banker's rounding).
    #[default]
    ToEven,
    /// Round to nearest, ties away from zero.
    AwayFromZero,
    /// Drop the digits (toward zero).
    Truncate,
    /// Toward negative infinity.
    Floor,
    /// Toward positive infinity.
    Ceiling,
}

/// Divides out `value.scale - target` digits, at most nine per step, with a
/// sticky bit over every remainder but the last. The mode only looks at the
/// last remainder, its divisor and the sticky bit.
///
/// At least one digit is divided out before the increment, so the mantissa
/// is at most `(2^96 - 1) / 10` and the increment cannot carry.
pub(crate) fn round_to_scale(value: &Decimal, target: u32, mode: RoundingMode) -> Decimal {
    let scale = value.scale as u32;
    if target >= scale {
        return *value;
    }

    let mut mantissa = value.mantissa;
    let mut pending = scale - target;
    let mut sticky = false;
    let mut rem = 0u32;
    let mut power = 1u32;
    while pending > 0 {
        sticky |= rem != 0;
        let step = pending.min(MAX_LIMB_POWER);
        power = POWERS_10[step as usize];
        rem = mantissa.div_small(power);
        pending -= step;
    }

    let half = power / 2;
    let discarded = rem != 0 || sticky;
    let round_up = match mode {
        RoundingMode::ToEven => rem > half || (rem == half && (sticky || mantissa.lo() & 1 == 1)),
        RoundingMode::AwayFromZero => rem >= half,
        RoundingMode::Truncate => false,
        RoundingMode::Floor => value.negative && discarded,
        RoundingMode::Ceiling => !value.negative && discarded,
    };
    if round_up {
        let carried = mantissa.add_small(1);
        debug_assert!(!carried);
    }
    Decimal::canonical(mantissa, target, value.negative)
}

// ============================================================================
// Rounding Operations
// ============================================================================

impl Decimal {
    /// Rounds to `decimal_places` digits after the point with the given mode.
    /// Values that already have no more digits than that are returned as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaledec::{Decimal, RoundingMode};
    ///
    /// let d: Decimal = "-2.345".parse().unwrap();
    /// assert_eq!(d.round_dp_with_mode(2, RoundingMode::ToEven).to_string(), "-2.34");
    /// assert_eq!(d.round_dp_with_mode(2, RoundingMode::AwayFromZero).to_string(), "-2.35");
    /// assert_eq!(d.round_dp_with_mode(2, RoundingMode::Floor).to_string(), "-2.35");
    /// assert_eq!(d.round_dp_with_mode(2, RoundingMode::Ceiling).to_string(), "-2.34");
    /// ```
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn round_dp_with_mode(self, decimal_places: u32, mode: RoundingMode) -> Self {
        round_to_scale(&self, decimal_places, mode)
    }

    /// Banker's rounding to `decimal_places` digits.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn round_dp(self, decimal_places: u32) -> Self {
        self.round_dp_with_mode(decimal_places, RoundingMode::ToEven)
    }

    /// Banker's rounding to an integer.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn round(self) -> Self {
        self.round_dp(0)
    }

    /// Integer part, rounding toward zero.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn trunc(self) -> Self {
        self.round_dp_with_mode(0, RoundingMode::Truncate)
    }

    /// Largest integer less than or equal to `self`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn floor(self) -> Self {
        self.round_dp_with_mode(0, RoundingMode::Floor)
    }

    /// Smallest integer greater than or equal to `self`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn ceil(self) -> Self {
        self.round_dp_with_mode(0, RoundingMode::Ceiling)
    }

    /// Fractional part, with the sign of `self`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn fract(self) -> Self {
        let mut mantissa = self.mantissa;
        let mut pending = self.scale as u32;
        let mut fraction = U96::ZERO;
        let mut weight = U96::from_u64(1);
        // Peel the low `scale` digits off in limb-sized chunks.
        while pending > 0 {
            let step = pending.min(MAX_LIMB_POWER);
            let chunk = mantissa.div_small(POWERS_10[step as usize]);
            let mut part = weight;
            part.mul_small(chunk);
            fraction.add_assign_carry(&part);
            weight.mul_small(POWERS_10[step as usize]);
            pending -= step;
        }
        Self::canonical(fraction, self.scale as u32, self.negative)
    }
}
