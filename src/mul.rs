//! Multiplication.

use crate::Result;
use crate::decimal::Decimal;
use crate::rescale::{MAX_SCALE, scale_result};
use crate::wide::mul_96x96;

/// Exact product when it fits; otherwise the 192-bit product is reduced to
/// 96 bits and scale 28 by [`scale_result`], rounding half-to-even once.
pub(crate) fn mul(a: &Decimal, b: &Decimal) -> Result<Decimal> {
    let negative = a.negative != b.negative;
    let scale = a.scale as i32 + b.scale as i32;

    let mut product = mul_96x96(&a.mantissa, &b.mantissa);
    let (mantissa, scale) = match product.narrow() {
        Some(mantissa) if scale <= MAX_SCALE as i32 => (mantissa, scale as u32),
        _ => scale_result(&mut product, scale)?,
    };
    Ok(Decimal::canonical(mantissa, scale, negative))
}
