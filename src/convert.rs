//! Integer and currency conversions.

use crate::decimal::Decimal;
use crate::rescale::unscale;
use crate::round::RoundingMode;
use crate::wide::U96;
use crate::{DecimalError, Result, fail};

/// Scale of the currency representation: an `i64` counting 10^-4 units.
const CURRENCY_SCALE: u32 = 4;

// ============================================================================
// Integer Conversions
// ============================================================================

impl Decimal {
    /// Creates from an `i64` at scale 0.
    #[inline(always)]
    pub const fn from_i64(value: i64) -> Self {
        Self::from_raw_parts(U96::from_u64(value.unsigned_abs()), 0, value < 0)
    }

    /// Creates from a `u64` at scale 0.
    #[inline(always)]
    pub const fn from_u64(value: u64) -> Self {
        Self::from_raw_parts(U96::from_u64(value), 0, false)
    }

    /// Creates from an `i128` if its magnitude fits 96 bits.
    pub fn try_from_i128(value: i128) -> Result<Self> {
        Self::try_new(value, 0)
    }

    /// Creates from a `u128` if it fits 96 bits.
    pub fn try_from_u128(value: u128) -> Result<Self> {
        let mantissa =
            U96::from_u128(value).ok_or_else(|| fail(DecimalError::Overflow, "from_u128"))?;
        Ok(Self::from_raw_parts(mantissa, 0, false))
    }

    /// Integer part as an `i128`, truncating toward zero. Always fits.
    #[inline]
    pub fn to_i128(self) -> i128 {
        self.trunc().mantissa()
    }

    /// Integer part as an `i64`, or `None` if out of range.
    #[inline]
    pub fn to_i64(self) -> Option<i64> {
        i64::try_from(self.to_i128()).ok()
    }

    /// Integer part as a `u64`, or `None` if negative or out of range.
    #[inline]
    pub fn to_u64(self) -> Option<u64> {
        u64::try_from(self.to_i128()).ok()
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                #[inline(always)]
                fn from(value: $t) -> Self {
                    Self::from_i64(value as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                #[inline(always)]
                fn from(value: $t) -> Self {
                    Self::from_u64(value as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl TryFrom<i128> for Decimal {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: i128) -> Result<Self> {
        Self::try_from_i128(value)
    }
}

impl TryFrom<u128> for Decimal {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(value: u128) -> Result<Self> {
        Self::try_from_u128(value)
    }
}

macro_rules! impl_try_into_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Decimal> for $t {
                type Error = DecimalError;

                /// Truncates toward zero, then range checks.
                fn try_from(value: Decimal) -> Result<Self> {
                    <$t>::try_from(value.to_i128())
                        .map_err(|_| fail(DecimalError::Overflow, "to_integer"))
                }
            }
        )*
    };
}

impl_try_into_int!(i32, i64, u32, u64);

// ============================================================================
// Currency Conversions
// ============================================================================

impl Decimal {
    /// Converts a currency amount stored as an `i64` count of 10^-4 units.
    /// Trailing zero digits are trimmed, so `12_3400` becomes `12.34`.
    pub fn from_currency_units(units: i64) -> Self {
        let mut mantissa = U96::from_u64(units.unsigned_abs());
        let scale = unscale(&mut mantissa, CURRENCY_SCALE);
        Self::canonical(mantissa, scale, units < 0)
    }

    /// Rounds half-to-even to four decimal places and returns the count of
    /// 10^-4 units. Returns [`DecimalError::Overflow`] if that count does not
    /// fit an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaledec::Decimal;
    ///
    /// let d: Decimal = "12.34565".parse().unwrap();
    /// assert_eq!(d.to_currency_units().unwrap(), 12_3456);
    /// ```
    pub fn to_currency_units(self) -> Result<i64> {
        let rounded = self.round_dp_with_mode(CURRENCY_SCALE, RoundingMode::ToEven);
        let mut mantissa = rounded.mantissa;
        if mantissa.scale_up(CURRENCY_SCALE - rounded.scale as u32) {
            return Err(fail(DecimalError::Overflow, "to_currency_units"));
        }
        let magnitude = mantissa.to_u128() as i128;
        let units = if rounded.negative { -magnitude } else { magnitude };
        i64::try_from(units).map_err(|_| fail(DecimalError::Overflow, "to_currency_units"))
    }
}

#[cfg(test)]
mod integer_tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Decimal::from(-5i8).mantissa(), -5);
        assert_eq!(Decimal::from(i64::MIN).mantissa(), i64::MIN as i128);
        assert_eq!(Decimal::from(u64::MAX).mantissa(), u64::MAX as i128);
        assert_eq!(Decimal::from(7u16).scale(), 0);
    }

    #[test]
    fn test_try_from_wide() {
        assert_eq!(
            Decimal::try_from((1i128 << 96) - 1).unwrap(),
            Decimal::MAX
        );
        assert_eq!(
            Decimal::try_from(1u128 << 96),
            Err(DecimalError::Overflow)
        );
        assert_eq!(
            Decimal::try_from(-(1i128 << 96)),
            Err(DecimalError::Overflow)
        );
    }

    #[test]
    fn test_to_integer_truncates() {
        let d = Decimal::try_new(-1_999, 3).unwrap();
        assert_eq!(i64::try_from(d).unwrap(), -1);
        assert_eq!(i32::try_from(d).unwrap(), -1);
        assert_eq!(u32::try_from(d), Err(DecimalError::Overflow));

        let d = Decimal::try_new(-999, 3).unwrap();
        assert_eq!(u64::try_from(d).unwrap(), 0);
    }

    #[test]
    fn test_to_integer_range() {
        assert_eq!(i64::try_from(Decimal::MAX), Err(DecimalError::Overflow));
        assert_eq!(Decimal::MAX.to_u64(), None);
        assert_eq!(Decimal::from(i64::MIN).to_i64(), Some(i64::MIN));
        assert_eq!(Decimal::MAX.to_i128(), (1i128 << 96) - 1);
    }
}
