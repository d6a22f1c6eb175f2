//! Conversions to and from binary floating point.

use crate::decimal::Decimal;
use crate::rescale::{MAX_SCALE, unscale};
use crate::wide::U96;
use crate::{DecimalError, Result, fail};

/// 10^0 ..= 10^28 as doubles.
const DOUBLE_POWERS_10: [f64; 29] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 1e23, 1e24, 1e25, 1e26, 1e27, 1e28,
];

/// 2^64
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Significant decimal digits kept from a double.
const F64_DIGITS: u32 = 15;

/// Significant decimal digits kept from a float.
const F32_DIGITS: u32 = 7;

/// Converts `|value| = fraction * 2^exp` (fraction in `[0.5, 1)`) keeping
/// `digits` significant decimal digits.
///
/// The decimal exponent is estimated as `exp * log10(2)`, with log10(2)
/// approximated by 19728 / 2^16. The value is scaled so that the integer part
/// holds `digits` digits, rounded half-to-even to an integer, and then either
/// multiplied back up (large values) or stripped of trailing zeros.
fn from_binary(value: f64, exp: i32, digits: u32, negative: bool) -> Result<Decimal> {
    if exp > 96 {
        return Err(fail(DecimalError::Overflow, "from_float"));
    }
    if exp < -94 {
        return Ok(Decimal::ZERO);
    }

    let top = digits as i32 - 1;
    let mut dbl = value;
    let mut power = top - ((exp * 19_728) >> 16);
    if power >= 0 {
        power = power.min(MAX_SCALE as i32);
        dbl *= DOUBLE_POWERS_10[power as usize];
    } else if power != -1 || dbl >= DOUBLE_POWERS_10[digits as usize] {
        dbl /= DOUBLE_POWERS_10[(-power) as usize];
    } else {
        power = 0;
    }

    if dbl < DOUBLE_POWERS_10[top as usize] && power < MAX_SCALE as i32 {
        dbl *= 10.0;
        power += 1;
    }

    // dbl < 10^16, so the integer part fits u64
    let mut mant = dbl as u64;
    let frac = dbl - mant as f64;
    if frac > 0.5 || (frac == 0.5 && mant & 1 == 1) {
        mant += 1;
    }
    if mant == 0 {
        return Ok(Decimal::ZERO);
    }

    if power < 0 {
        let wide = mant as u128 * 10u128.pow((-power) as u32);
        let mantissa =
            U96::from_u128(wide).ok_or_else(|| fail(DecimalError::Overflow, "from_float"))?;
        return Ok(Decimal::from_raw_parts(mantissa, 0, negative));
    }

    let mut mantissa = U96::from_u64(mant);
    let budget = (power as u32).min(top as u32);
    let left = unscale(&mut mantissa, budget);
    let scale = power as u32 - (budget - left);
    Ok(Decimal::from_raw_parts(mantissa, scale, negative))
}

// ============================================================================
// Float Conversions
// ============================================================================

impl Decimal {
    /// Nearest double to `mantissa / 10^scale`. Precision may be lost.
    pub fn to_f64(self) -> f64 {
        let mantissa = self.mantissa.low64() as f64 + self.mantissa.hi() as f64 * TWO_POW_64;
        let value = mantissa / DOUBLE_POWERS_10[self.scale as usize];
        if self.negative { -value } else { value }
    }

    /// Converts through [`Decimal::to_f64`].
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Converts a double, keeping at most 15 significant digits.
    ///
    /// Magnitudes below 10^-28 become zero. NaN, infinities and magnitudes
    /// of 2^96 and above are [`DecimalError::Overflow`].
    ///
    /// # Examples
    ///
    /// ```
    /// use scaledec::Decimal;
    ///
    /// let d = Decimal::try_from_f64(0.1).unwrap();
    /// assert_eq!(d.to_string(), "0.1");
    /// assert!(Decimal::try_from_f64(1e29).is_err());
    /// ```
    pub fn try_from_f64(value: f64) -> Result<Self> {
        let bits = value.to_bits();
        let exp = ((bits >> 52) & 0x7FF) as i32 - 1022;
        let magnitude = f64::from_bits(bits & !(1 << 63));
        from_binary(magnitude, exp, F64_DIGITS, value.is_sign_negative())
    }

    /// Converts a float, keeping at most 7 significant digits.
    pub fn try_from_f32(value: f32) -> Result<Self> {
        let bits = value.to_bits();
        let exp = ((bits >> 23) & 0xFF) as i32 - 126;
        let magnitude = f32::from_bits(bits & !(1 << 31));
        from_binary(magnitude as f64, exp, F32_DIGITS, value.is_sign_negative())
    }

    /// Checked form of [`Decimal::try_from_f64`].
    #[inline(always)]
    pub fn from_f64(value: f64) -> Option<Self> {
        Self::try_from_f64(value).ok()
    }

    /// Checked form of [`Decimal::try_from_f32`].
    #[inline(always)]
    pub fn from_f32(value: f32) -> Option<Self> {
        Self::try_from_f32(value).ok()
    }
}

impl TryFrom<f64> for Decimal {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: f64) -> Result<Self> {
        Self::try_from_f64(value)
    }
}

impl TryFrom<f32> for Decimal {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: f32) -> Result<Self> {
        Self::try_from_f32(value)
    }
}
