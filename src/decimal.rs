use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::rescale::{MAX_SCALE, unscale};
use crate::wide::U96;
use crate::{DecimalError, add, div, fail, mul};

/// Bit 31 of the flags word.
const SIGN_MASK: u32 = 0x8000_0000;

/// Bits 16-23 of the flags word.
const SCALE_MASK: u32 = 0x00FF_0000;

const SCALE_SHIFT: u32 = 16;

/// 128-bit scaled decimal.
///
/// The value is `(-1)^negative * mantissa / 10^scale` with an unsigned 96-bit
/// mantissa and `scale` in `0..=28`. The same value may have several encodings
/// (`1.0` and `1.00`); equality, ordering and hashing all go by value.
///
/// Range: ±79,228,162,514,264,337,593,543,950,335
/// Precision: 0.0000000000000000000000000001
#[derive(Copy, Clone)]
pub struct Decimal {
    pub(crate) mantissa: U96,
    pub(crate) scale: u8,
    pub(crate) negative: bool,
}

// ============================================================================
// Constants
// ============================================================================

impl Decimal {
    /// Largest supported scale.
    pub const MAX_SCALE: u32 = MAX_SCALE;

    /// Zero
    pub const ZERO: Self = Self::from_raw_parts(U96::ZERO, 0, false);

    /// One (1)
    pub const ONE: Self = Self::from_raw_parts(U96::from_u64(1), 0, false);

    /// Negative one (-1)
    pub const NEGATIVE_ONE: Self = Self::from_raw_parts(U96::from_u64(1), 0, true);

    /// Ten (10)
    pub const TEN: Self = Self::from_raw_parts(U96::from_u64(10), 0, false);

    /// One hundred (100)
    pub const ONE_HUNDRED: Self = Self::from_raw_parts(U96::from_u64(100), 0, false);

    /// Largest value: 2^96 - 1
    pub const MAX: Self = Self::from_raw_parts(U96::MAX, 0, false);

    /// Smallest value: -(2^96 - 1)
    pub const MIN: Self = Self::from_raw_parts(U96::MAX, 0, true);
}

impl Default for Decimal {
    #[inline(always)]
    fn default() -> Self {
        Self::ZERO
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Decimal {
    /// Assembles a value without validation. `scale` must be at most 28.
    #[inline(always)]
    pub(crate) const fn from_raw_parts(mantissa: U96, scale: u32, negative: bool) -> Self {
        debug_assert!(scale <= MAX_SCALE);
        Self {
            mantissa,
            scale: scale as u8,
            negative,
        }
    }

    /// Like [`Decimal::from_raw_parts`], but a zero result is always positive.
    #[inline(always)]
    pub(crate) fn canonical(mantissa: U96, scale: u32, negative: bool) -> Self {
        let negative = negative && !mantissa.is_zero();
        Self::from_raw_parts(mantissa, scale, negative)
    }

    /// Builds a value from its mantissa words, sign and scale.
    ///
    /// Returns [`DecimalError::InvalidRepresentation`] if `scale` exceeds 28.
    pub fn from_parts(lo: u32, mid: u32, hi: u32, negative: bool, scale: u32) -> crate::Result<Self> {
        if scale > MAX_SCALE {
            return Err(fail(DecimalError::InvalidRepresentation, "from_parts"));
        }
        Ok(Self::from_raw_parts(U96::new(lo, mid, hi), scale, negative))
    }

    /// Builds `mantissa / 10^scale` from a signed integer mantissa.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaledec::Decimal;
    ///
    /// let price = Decimal::try_new(-12_345, 2).unwrap();
    /// assert_eq!(price.to_string(), "-123.45");
    /// ```
    pub fn try_new(mantissa: i128, scale: u32) -> crate::Result<Self> {
        if scale > MAX_SCALE {
            return Err(fail(DecimalError::InvalidRepresentation, "try_new"));
        }
        let magnitude = U96::from_u128(mantissa.unsigned_abs())
            .ok_or_else(|| fail(DecimalError::Overflow, "try_new"))?;
        Ok(Self::from_raw_parts(magnitude, scale, mantissa < 0))
    }
}

// ============================================================================
// Binary Layout
// ============================================================================

impl Decimal {
    /// The size of the binary layout in bytes.
    pub const BYTES: usize = 16;

    /// Decodes the four-word layout `[lo, mid, hi, flags]`.
    ///
    /// `flags` may only carry the sign (bit 31) and the scale (bits 16-23,
    /// at most 28). Anything else is [`DecimalError::InvalidRepresentation`].
    pub fn from_words(words: [u32; 4]) -> crate::Result<Self> {
        let flags = words[3];
        let scale = (flags & SCALE_MASK) >> SCALE_SHIFT;
        if flags & !(SIGN_MASK | SCALE_MASK) != 0 || scale > MAX_SCALE {
            return Err(fail(DecimalError::InvalidRepresentation, "from_words"));
        }
        Ok(Self::from_raw_parts(
            U96::new(words[0], words[1], words[2]),
            scale,
            flags & SIGN_MASK != 0,
        ))
    }

    /// Encodes the four-word layout `[lo, mid, hi, flags]`.
    #[inline]
    pub const fn to_words(&self) -> [u32; 4] {
        let mut flags = (self.scale as u32) << SCALE_SHIFT;
        if self.negative {
            flags |= SIGN_MASK;
        }
        [self.mantissa.lo(), self.mantissa.mid(), self.mantissa.hi(), flags]
    }

    /// Decodes the four words, each stored little-endian, in layout order.
    pub fn from_le_bytes(bytes: [u8; Self::BYTES]) -> crate::Result<Self> {
        let word = |i: usize| {
            u32::from_le_bytes([bytes[4 * i], bytes[4 * i + 1], bytes[4 * i + 2], bytes[4 * i + 3]])
        };
        Self::from_words([word(0), word(1), word(2), word(3)])
    }

    /// Encodes the four words, each stored little-endian, in layout order.
    pub fn to_le_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.to_words()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Decimal {
    /// Number of digits after the decimal point.
    #[inline(always)]
    pub const fn scale(&self) -> u32 {
        self.scale as u32
    }

    /// Signed mantissa; the value is `mantissa() / 10^scale()`.
    #[inline(always)]
    pub const fn mantissa(&self) -> i128 {
        let magnitude = self.mantissa.to_u128() as i128;
        if self.negative { -magnitude } else { magnitude }
    }

    /// Magnitude of the mantissa, below 2^96.
    #[inline(always)]
    pub const fn unsigned_mantissa(&self) -> u128 {
        self.mantissa.to_u128()
    }

    /// Returns `true` if the mantissa is zero, whatever the sign and scale.
    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns `true` if the sign bit is set. This includes negative zero.
    #[inline(always)]
    pub const fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` if the sign bit is clear.
    #[inline(always)]
    pub const fn is_sign_positive(&self) -> bool {
        !self.negative
    }

    /// Returns the sign of `self` as -1, 0, or 1.
    #[inline(always)]
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// Returns the absolute value of `self`.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub const fn abs(self) -> Self {
        Self {
            negative: false,
            ..self
        }
    }

    /// Strips trailing zeros from the mantissa, giving the smallest scale that
    /// represents the same value. Zero becomes positive zero at scale 0.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn normalize(self) -> Self {
        let mut mantissa = self.mantissa;
        let scale = unscale(&mut mantissa, self.scale as u32);
        Self::canonical(mantissa, scale, self.negative)
    }
}

// ============================================================================
// Arithmetic Operations - Addition
// ============================================================================

impl Decimal {
    /// Checked addition. Returns `None` if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        add::add_sub(&self, &rhs, false).ok()
    }

    /// Saturating addition. Clamps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn saturating_add(self, rhs: Self) -> Self {
        match add::add_sub(&self, &rhs, false) {
            Ok(result) => result,
            // Only operands of the same sign can overflow.
            Err(_) => Self::saturated(self.negative),
        }
    }

    /// Checked addition. Returns an error if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_add(self, rhs: Self) -> crate::Result<Self> {
        add::add_sub(&self, &rhs, false)
    }
}

// ============================================================================
// Arithmetic Operations - Subtraction
// ============================================================================

impl Decimal {
    /// Checked subtraction. Returns `None` if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        add::add_sub(&self, &rhs, true).ok()
    }

    /// Saturating subtraction. Clamps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        match add::add_sub(&self, &rhs, true) {
            Ok(result) => result,
            Err(_) => Self::saturated(self.negative),
        }
    }

    /// Checked subtraction. Returns an error if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_sub(self, rhs: Self) -> crate::Result<Self> {
        add::add_sub(&self, &rhs, true)
    }
}

// ============================================================================
// Arithmetic Operations - Multiplication
// ============================================================================

impl Decimal {
    /// Checked multiplication. Returns `None` if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        mul::mul(&self, &rhs).ok()
    }

    /// Saturating multiplication. Clamps on overflow.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn saturating_mul(self, rhs: Self) -> Self {
        match mul::mul(&self, &rhs) {
            Ok(result) => result,
            Err(_) => Self::saturated(self.negative != rhs.negative),
        }
    }

    /// Checked multiplication. Returns an error if overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_mul(self, rhs: Self) -> crate::Result<Self> {
        mul::mul(&self, &rhs)
    }
}

// ============================================================================
// Arithmetic Operations - Division
// ============================================================================

impl Decimal {
    /// Checked division. Returns `None` if `rhs` is zero or overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        div::div(&self, &rhs).ok()
    }

    /// Saturating division. Clamps on overflow. Returns zero if `rhs` is zero.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn saturating_div(self, rhs: Self) -> Self {
        match div::div(&self, &rhs) {
            Ok(result) => result,
            Err(DecimalError::DivideByZero) => Self::ZERO,
            Err(_) => Self::saturated(self.negative != rhs.negative),
        }
    }

    /// Checked division. Returns an error if `rhs` is zero or overflow occurred.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_div(self, rhs: Self) -> crate::Result<Self> {
        div::div(&self, &rhs)
    }
}

// ============================================================================
// Arithmetic Operations - Remainder
// ============================================================================

impl Decimal {
    /// Checked remainder. Returns `None` if `rhs` is zero.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_rem(self, rhs: Self) -> Option<Self> {
        div::rem(&self, &rhs).ok()
    }

    /// Remainder of truncated division, carrying the sign of `self`.
    /// Returns an error if `rhs` is zero.
    #[inline(always)]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_rem(self, rhs: Self) -> crate::Result<Self> {
        div::rem(&self, &rhs)
    }
}

impl Decimal {
    #[inline(always)]
    const fn saturated(negative: bool) -> Self {
        if negative { Self::MIN } else { Self::MAX }
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Orders magnitudes, ignoring sign.
///
/// The smaller-scale mantissa is scaled up to the other scale. If that leaves
/// 96 bits, it is the larger one.
pub(crate) fn cmp_magnitude(a: &Decimal, b: &Decimal) -> Ordering {
    match a.scale.cmp(&b.scale) {
        Ordering::Equal => a.mantissa.cmp(&b.mantissa),
        Ordering::Less => {
            let mut scaled = a.mantissa;
            if scaled.scale_up((b.scale - a.scale) as u32) {
                return Ordering::Greater;
            }
            scaled.cmp(&b.mantissa)
        }
        Ordering::Greater => {
            let mut scaled = b.mantissa;
            if scaled.scale_up((a.scale - b.scale) as u32) {
                return Ordering::Less;
            }
            a.mantissa.cmp(&scaled)
        }
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if other.negative {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                if self.negative {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => match (self.negative, other.negative) {
                (false, true) => Ordering::Greater,
                (true, false) => Ordering::Less,
                (false, false) => cmp_magnitude(self, other),
                (true, true) => cmp_magnitude(other, self),
            },
        }
    }
}

impl PartialOrd for Decimal {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal values share one normalized encoding.
        let normalized = self.normalize();
        normalized.negative.hash(state);
        normalized.scale.hash(state);
        normalized.mantissa.hash(state);
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl Add for Decimal {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("attempt to add with overflow")
    }
}

impl Sub for Decimal {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
            .expect("attempt to subtract with overflow")
    }
}

impl Mul for Decimal {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
            .expect("attempt to multiply with overflow")
    }
}

impl Div for Decimal {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs)
            .expect("attempt to divide by zero or overflow")
    }
}

impl Rem for Decimal {
    type Output = Self;

    #[inline(always)]
    fn rem(self, rhs: Self) -> Self::Output {
        self.checked_rem(rhs)
            .expect("attempt to calculate the remainder with a divisor of zero")
    }
}

impl Neg for Decimal {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self {
            negative: !self.negative,
            ..self
        }
    }
}

impl AddAssign for Decimal {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Decimal {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Decimal {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Decimal {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl RemAssign for Decimal {
    #[inline(always)]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

// ============================================================================
// Iterator Trait Implementations
// ============================================================================

impl Sum for Decimal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl Product for Decimal {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * *x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, TOML, etc. - use string representation
            serializer.collect_str(self)
        } else {
            // Bincode, MessagePack, etc. - the four-word layout
            self.to_words().serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            struct DecimalVisitor;

            impl<'de> de::Visitor<'de> for DecimalVisitor {
                type Value = Decimal;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a decimal number string or an integer")
                }

                fn visit_str<E>(self, v: &str) -> core::result::Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    v.parse::<Decimal>().map_err(de::Error::custom)
                }

                fn visit_i64<E>(self, v: i64) -> core::result::Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(Decimal::from(v))
                }

                fn visit_u64<E>(self, v: u64) -> core::result::Result<Self::Value, E>
                where
                    E: de::Error,
                {
                    Ok(Decimal::from(v))
                }
            }

            deserializer.deserialize_any(DecimalVisitor)
        } else {
            let words = <[u32; 4]>::deserialize(deserializer)?;
            Self::from_words(words).map_err(de::Error::custom)
        }
    }
}
