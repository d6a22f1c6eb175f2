//! Fixed-width multi-word integers.
//!
//! All buffers are little-endian arrays of 32-bit limbs. The 96-bit type is the
//! decimal mantissa; the 192-bit type is scratch space for products and scale
//! alignment. Division remainders that never exceed 128 bits live in
//! a plain `u128`.

use core::cmp::Ordering;

/// 10^0 ..= 10^9, every power of ten that fits in a single limb.
pub(crate) const POWERS_10: [u32; 10] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Largest power of ten applied in one limb-wide step.
pub(crate) const MAX_LIMB_POWER: u32 = 9;

/// Little-endian limb array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Limbs<const N: usize>(pub(crate) [u32; N]);

/// 96-bit mantissa.
pub(crate) type U96 = Limbs<3>;

/// 192-bit product / alignment buffer.
pub(crate) type U192 = Limbs<6>;

impl<const N: usize> Limbs<N> {
    pub(crate) const ZERO: Self = Self([0; N]);

    #[inline(always)]
    pub(crate) fn is_zero(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }

    /// Index of the highest non-zero limb, 0 for zero.
    #[inline]
    pub(crate) fn top_index(&self) -> usize {
        self.0.iter().rposition(|&limb| limb != 0).unwrap_or(0)
    }

    /// Number of significant bits.
    #[inline]
    pub(crate) fn bit_len(&self) -> u32 {
        let top = self.top_index();
        top as u32 * 32 + (32 - self.0[top].leading_zeros())
    }

    /// Copies into a buffer at least as wide.
    #[inline]
    pub(crate) fn widen<const M: usize>(&self) -> Limbs<M> {
        debug_assert!(M >= N);
        let mut out = [0u32; M];
        out[..N].copy_from_slice(&self.0);
        Limbs(out)
    }

    /// Returns the low 96 bits if nothing above them is set.
    #[inline]
    pub(crate) fn narrow(&self) -> Option<U96> {
        if self.0.iter().skip(3).any(|&limb| limb != 0) {
            return None;
        }
        let mut out = [0u32; 3];
        let n = N.min(3);
        out[..n].copy_from_slice(&self.0[..n]);
        Some(Limbs(out))
    }

    /// `self *= factor`; returns the limb that carried out of the top.
    #[inline]
    pub(crate) fn mul_small(&mut self, factor: u32) -> u32 {
        let factor = factor as u64;
        let mut carry = 0u64;
        for limb in self.0.iter_mut() {
            let t = *limb as u64 * factor + carry;
            *limb = t as u32;
            carry = t >> 32;
        }
        carry as u32
    }

    /// `self /= divisor`, top limb first; returns the remainder.
    #[inline]
    pub(crate) fn div_small(&mut self, divisor: u32) -> u32 {
        debug_assert!(divisor != 0);
        let divisor = divisor as u64;
        let mut rem = 0u64;
        for limb in self.0.iter_mut().rev() {
            let num = (rem << 32) | *limb as u64;
            *limb = (num / divisor) as u32;
            rem = num % divisor;
        }
        rem as u32
    }

    /// `self += value`; returns true if the sum carried out of the top limb.
    #[inline]
    pub(crate) fn add_small(&mut self, value: u32) -> bool {
        let mut carry = value as u64;
        for limb in self.0.iter_mut() {
            if carry == 0 {
                return false;
            }
            let t = *limb as u64 + carry;
            *limb = t as u32;
            carry = t >> 32;
        }
        carry != 0
    }

    /// `self += rhs`; returns the carry out of the top limb.
    #[inline]
    pub(crate) fn add_assign_carry(&mut self, rhs: &Self) -> bool {
        let mut carry = 0u64;
        for (limb, &r) in self.0.iter_mut().zip(rhs.0.iter()) {
            let t = *limb as u64 + r as u64 + carry;
            *limb = t as u32;
            carry = t >> 32;
        }
        carry != 0
    }

    /// `self -= rhs` (wrapping); returns true if a borrow left the top limb.
    #[inline]
    pub(crate) fn sub_assign_borrow(&mut self, rhs: &Self) -> bool {
        let mut borrow = false;
        for (limb, &r) in self.0.iter_mut().zip(rhs.0.iter()) {
            let (t, b1) = limb.overflowing_sub(r);
            let (t, b2) = t.overflowing_sub(borrow as u32);
            *limb = t;
            borrow = b1 || b2;
        }
        borrow
    }

    /// Two's-complement negation in place.
    #[inline]
    pub(crate) fn negate(&mut self) {
        for limb in self.0.iter_mut() {
            *limb = !*limb;
        }
        self.add_small(1);
    }

    /// Multiplies by `10^exp`, at most nine digits per step. Returns true if
    /// any limb carried out of the buffer, in which case the contents are
    /// truncated garbage.
    pub(crate) fn scale_up(&mut self, mut exp: u32) -> bool {
        while exp > 0 {
            let step = exp.min(MAX_LIMB_POWER);
            if self.mul_small(POWERS_10[step as usize]) != 0 {
                return true;
            }
            exp -= step;
        }
        false
    }

    /// Divides by `divisor` only if it leaves no remainder.
    #[inline]
    pub(crate) fn divide_exact(&mut self, divisor: u32) -> bool {
        let mut trial = *self;
        if trial.div_small(divisor) == 0 {
            *self = trial;
            true
        } else {
            false
        }
    }
}

impl<const N: usize> Ord for Limbs<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl<const N: usize> PartialOrd for Limbs<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// 96-bit accessors
// ============================================================================

impl U96 {
    /// 2^96 - 1
    pub(crate) const MAX_VALUE: u128 = (1u128 << 96) - 1;

    pub(crate) const MAX: Self = Self([u32::MAX; 3]);

    #[inline(always)]
    pub(crate) const fn new(lo: u32, mid: u32, hi: u32) -> Self {
        Self([lo, mid, hi])
    }

    #[inline(always)]
    pub(crate) const fn from_u64(value: u64) -> Self {
        Self([value as u32, (value >> 32) as u32, 0])
    }

    #[inline(always)]
    pub(crate) const fn from_u128(value: u128) -> Option<Self> {
        if value > Self::MAX_VALUE {
            return None;
        }
        Some(Self([value as u32, (value >> 32) as u32, (value >> 64) as u32]))
    }

    #[inline(always)]
    pub(crate) const fn to_u128(self) -> u128 {
        (self.0[2] as u128) << 64 | (self.0[1] as u128) << 32 | self.0[0] as u128
    }

    #[inline(always)]
    pub(crate) const fn lo(&self) -> u32 {
        self.0[0]
    }

    #[inline(always)]
    pub(crate) const fn mid(&self) -> u32 {
        self.0[1]
    }

    #[inline(always)]
    pub(crate) const fn hi(&self) -> u32 {
        self.0[2]
    }

    /// lo + mid
    #[inline(always)]
    pub(crate) const fn low64(&self) -> u64 {
        (self.0[1] as u64) << 32 | self.0[0] as u64
    }
}

// ============================================================================
// Multiplication
// ============================================================================

/// Schoolbook 96×96 → 192-bit product.
pub(crate) fn mul_96x96(a: &U96, b: &U96) -> U192 {
    let mut out = [0u32; 6];
    for (i, &x) in a.0.iter().enumerate() {
        if x == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &y) in b.0.iter().enumerate() {
            // (2^32-1)^2 + 2(2^32-1) == 2^64-1, so this never wraps
            let t = x as u64 * y as u64 + out[i + j] as u64 + carry;
            out[i + j] = t as u32;
            carry = t >> 32;
        }
        out[i + 3] = carry as u32;
    }
    Limbs(out)
}

// ============================================================================
// Long division with a normalised divisor
// ============================================================================

/// Divides a 96-bit value by a 64-bit divisor whose top bit is set.
///
/// Requires `num < den << 32`, so the quotient fits one limb. The estimate
/// from the top two limbs over the divisor's top limb overshoots by at most 2.
#[inline]
pub(crate) fn div96_by_64(num: u128, den: u64) -> (u32, u64) {
    debug_assert!(den >> 63 == 1);
    debug_assert!(num < (den as u128) << 32);

    let den_hi = den >> 32;
    let num_top = (num >> 32) as u64;
    let mut quotient = (num_top / den_hi).min(u32::MAX as u64);
    let mut product = quotient as u128 * den as u128;
    while product > num {
        quotient -= 1;
        product -= den as u128;
    }
    (quotient as u32, (num - product) as u64)
}

/// Divides a 128-bit value by a 96-bit divisor whose top bit (bit 95) is set.
///
/// Requires `num < den << 32`.
#[inline]
pub(crate) fn div128_by_96(num: u128, den: u128) -> (u32, u128) {
    debug_assert!(den >> 95 == 1 && den >> 96 == 0);
    debug_assert!(num >> 32 < den);

    let den_hi = (den >> 64) as u64;
    let num_top = (num >> 64) as u64;
    let mut quotient = (num_top / den_hi).min(u32::MAX as u64);
    let mut product = quotient as u128 * den;
    while product > num {
        quotient -= 1;
        product -= den;
    }
    (quotient as u32, num - product)
}

/// A non-zero divisor prepared for repeated long division.
///
/// Wide divisors are shifted left until their top bit is set; remainders
/// handed out by [`Divisor::divide`] and [`Divisor::step`] live in that
/// shifted domain and are converted back with [`Divisor::unshift`].
#[derive(Clone, Copy, Debug)]
pub(crate) enum Divisor {
    /// Fits one limb: plain 96-by-32 division.
    Limb(u32),
    /// 33-64 significant bits.
    Double { den: u64, shift: u32 },
    /// 65-96 significant bits.
    Triple { den: u128, shift: u32 },
}

impl Divisor {
    pub(crate) fn new(value: &U96) -> Self {
        debug_assert!(!value.is_zero());
        if value.hi() == 0 && value.mid() == 0 {
            Self::Limb(value.lo())
        } else if value.hi() == 0 {
            let shift = value.mid().leading_zeros();
            Self::Double {
                den: value.low64() << shift,
                shift,
            }
        } else {
            let shift = value.hi().leading_zeros();
            Self::Triple {
                den: value.to_u128() << shift,
                shift,
            }
        }
    }

    /// Full division of a 96-bit dividend. Returns the quotient and the
    /// shifted remainder.
    pub(crate) fn divide(&self, dividend: &U96) -> (U96, u128) {
        match *self {
            Self::Limb(den) => {
                let mut quotient = *dividend;
                let rem = quotient.div_small(den);
                (quotient, rem as u128)
            }
            Self::Double { den, shift } => {
                // < 2^127, and the quotient fits two limbs
                let num = dividend.to_u128() << shift;
                let (q_hi, rem) = div96_by_64(num >> 32, den);
                let (q_lo, rem) = div96_by_64((rem as u128) << 32 | (num as u32) as u128, den);
                (
                    U96::from_u64((q_hi as u64) << 32 | q_lo as u64),
                    rem as u128,
                )
            }
            Self::Triple { den, shift } => {
                let num = dividend.to_u128() << shift;
                let (quotient, rem) = div128_by_96(num, den);
                (U96::new(quotient, 0, 0), rem)
            }
        }
    }

    /// Scales a shifted remainder by `power` (≤ 10^9) and divides again,
    /// producing the next quotient limb and the new shifted remainder.
    pub(crate) fn step(&self, rem: u128, power: u32) -> (u32, u128) {
        match *self {
            Self::Limb(den) => {
                let num = rem as u64 * power as u64;
                ((num / den as u64) as u32, (num % den as u64) as u128)
            }
            Self::Double { den, .. } => {
                let (quotient, rem) = div96_by_64(rem * power as u128, den);
                (quotient, rem as u128)
            }
            Self::Triple { den, .. } => div128_by_96(rem * power as u128, den),
        }
    }

    /// Round-half-even decision for a final shifted remainder.
    pub(crate) fn rounds_up(&self, rem: u128, quotient_is_odd: bool) -> bool {
        let den = match *self {
            Self::Limb(den) => den as u128,
            Self::Double { den, .. } => den as u128,
            Self::Triple { den, .. } => den,
        };
        let twice = rem << 1;
        twice > den || (twice == den && quotient_is_odd)
    }

    /// Converts a shifted remainder back to its true value.
    pub(crate) fn unshift(&self, rem: u128) -> U96 {
        let shift = match *self {
            Self::Limb(_) => 0,
            Self::Double { shift, .. } | Self::Triple { shift, .. } => shift,
        };
        let value = rem >> shift;
        U96::new(value as u32, (value >> 32) as u32, (value >> 64) as u32)
    }
}
