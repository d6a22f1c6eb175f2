//! Scale bookkeeping shared by the arithmetic kernels: how far a quotient can
//! still be scaled up, how a wide result is brought back into 96 bits, and how
//! trailing zeros are stripped.

use crate::wide::{MAX_LIMB_POWER, POWERS_10, U96, U192};
use crate::{DecimalError, Result, fail};

pub(crate) const MAX_SCALE: u32 = 28;

/// `OVERFLOW_THRESHOLDS[k]` is the largest 96-bit value that can be multiplied
/// by 10^k without leaving 96 bits.
const OVERFLOW_THRESHOLDS: [u128; 10] = {
    let mut table = [0u128; 10];
    let mut k = 0;
    while k < 10 {
        table[k] = U96::MAX_VALUE / POWERS_10[k] as u128;
        k += 1;
    }
    table
};

/// Largest power of ten (≤ 9, and not past scale 28) the quotient can be
/// multiplied by without overflowing 96 bits.
///
/// A negative `scale` that this step cannot bring back to zero means the
/// integer part of the result is too large. A full nine-digit step is always
/// taken, since the quotient may keep growing after it.
pub(crate) fn search_scale(quotient: &U96, scale: i32) -> Result<u32> {
    let value = quotient.to_u128();
    let room = (MAX_SCALE as i32 - scale).clamp(0, MAX_LIMB_POWER as i32) as usize;
    let mut power = room;
    while power > 0 && value > OVERFLOW_THRESHOLDS[power] {
        power -= 1;
    }
    if power < MAX_LIMB_POWER as usize && power as i32 + scale < 0 {
        return Err(fail(DecimalError::Overflow, "search_scale"));
    }
    Ok(power as u32)
}

/// Recovers from a quotient that carried out of 96 bits: puts the lost 97th
/// bit back, divides by ten and rounds the dropped digit half-to-even
/// (`sticky` marks discarded non-zero digits below it). Returns the new scale.
pub(crate) fn unscale_from_overflow(quotient: &mut U96, scale: i32, sticky: bool) -> Result<i32> {
    let scale = scale - 1;
    if scale < 0 {
        return Err(fail(DecimalError::Overflow, "unscale_from_overflow"));
    }
    let value = (1u128 << 96) | quotient.to_u128();
    let mut reduced = value / 10;
    let digit = (value % 10) as u32;
    if digit > 5 || (digit == 5 && (sticky || reduced & 1 == 1)) {
        reduced += 1;
    }
    // 2^97 / 10 < 2^94
    *quotient = U96::new(reduced as u32, (reduced >> 32) as u32, (reduced >> 64) as u32);
    Ok(scale)
}

/// Adds one unit in the last place, unscaling if that carries out of 96 bits.
#[inline]
pub(crate) fn round_up(quotient: &mut U96, scale: i32) -> Result<i32> {
    if quotient.add_small(1) {
        return unscale_from_overflow(quotient, scale, true);
    }
    Ok(scale)
}

/// Strips trailing decimal zeros while `scale` allows, trying 10^8 repeatedly
/// and then 10^4, 10^2, 10^1 once each. Zero always ends at scale 0.
///
/// 10^k contains 2^k, so the low bits give a cheap divisibility pre-test.
pub(crate) fn unscale(mantissa: &mut U96, mut scale: u32) -> u32 {
    if mantissa.is_zero() {
        return 0;
    }
    while scale >= 8 && mantissa.lo().trailing_zeros() >= 8 && mantissa.divide_exact(POWERS_10[8]) {
        scale -= 8;
    }
    for step in [4u32, 2, 1] {
        if scale >= step
            && mantissa.lo().trailing_zeros() >= step
            && mantissa.divide_exact(POWERS_10[step as usize])
        {
            scale -= step;
        }
    }
    scale
}

/// Brings a wide (up to 192-bit) intermediate back into 96 bits and the scale
/// back into `0..=28` by dividing out powers of ten, rounding half-to-even
/// once on the final division with a sticky bit over everything discarded
/// before it.
pub(crate) fn scale_result(buf: &mut U192, mut scale: i32) -> Result<(U96, u32)> {
    let mut reduce = 0i32;
    let top = buf.top_index();
    if top > 2 {
        // Bits above 96, scaled by log10(2) ~ 77/256. The estimate never
        // exceeds the true minimum, so no digit is dropped needlessly.
        let excess = buf.bit_len() as i32 - 96;
        reduce = (((excess - 1) * 77) >> 8) + 1;
        if reduce > scale {
            return Err(fail(DecimalError::Overflow, "scale_result"));
        }
    }
    reduce = reduce.max(scale - MAX_SCALE as i32);

    if reduce > 0 {
        scale -= reduce;
        let mut sticky = false;
        let mut rem = 0u32;
        loop {
            sticky |= rem != 0;
            let step = reduce.min(MAX_LIMB_POWER as i32) as usize;
            let power = POWERS_10[step];
            rem = buf.div_small(power);
            reduce -= step as i32;
            if reduce > 0 {
                continue;
            }

            // The estimate may be one digit short.
            if buf.top_index() > 2 {
                if scale == 0 {
                    return Err(fail(DecimalError::Overflow, "scale_result"));
                }
                reduce = 1;
                scale -= 1;
                continue;
            }

            let half = power / 2;
            if rem > half || (rem == half && (sticky || buf.0[0] & 1 == 1)) {
                buf.add_small(1);
                if buf.top_index() > 2 {
                    // Rounding carried into bit 96: take one more digit off
                    // the now exact value.
                    if scale == 0 {
                        return Err(fail(DecimalError::Overflow, "scale_result"));
                    }
                    sticky = false;
                    rem = 0;
                    reduce = 1;
                    scale -= 1;
                    continue;
                }
            }
            break;
        }
    }

    let mantissa = buf
        .narrow()
        .ok_or_else(|| fail(DecimalError::Overflow, "scale_result"))?;
    Ok((mantissa, scale as u32))
}
