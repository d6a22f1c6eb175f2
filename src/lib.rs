//! 128-bit scaled decimal arithmetic.
//!
//! [`Decimal`] stores a sign, a power-of-ten scale in `0..=28` and an unsigned
//! 96-bit mantissa; the value is `(-1)^sign * mantissa / 10^scale`.
//!
//! - **Range**: ±79,228,162,514,264,337,593,543,950,335
//! - **Precision**: up to 28 fractional digits (0.0000000000000000000000000001)
//! - **Exact**: addition, subtraction and multiplication are exact whenever the
//!   result fits; otherwise the result is rounded half-to-even to the largest
//!   scale that fits, and only unrepresentable integer parts raise
//!   [`DecimalError::Overflow`]
//!
//! ## Features
//!
//! - **no_std**: the engine never allocates and has no global state
//! - **Fixed-width kernels**: 96/128/192-bit limb arithmetic, no bignum
//! - **Bit-exact layout**: four 32-bit words `[lo, mid, hi, flags]`
//! - **Serde support** (`serde` feature): strings for human-readable formats,
//!   the four-word layout for binary ones
//! - **Diagnostics** (`tracing` feature): failing operations emit a debug event
//!
//! ## Example
//!
//! ```rust
//! use core::str::FromStr;
//! use scaledec::{Decimal, RoundingMode};
//!
//! let a = Decimal::from_str("0.1").unwrap();
//! let b = Decimal::from_str("0.2").unwrap();
//! assert_eq!(a + b, Decimal::from_str("0.3").unwrap());
//!
//! let third = Decimal::ONE / Decimal::from(3);
//! assert_eq!(third.scale(), 28);
//! assert_eq!(
//!     third.round_dp_with_mode(2, RoundingMode::AwayFromZero).to_string(),
//!     "0.33"
//! );
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod add;
mod convert;
mod decimal;
mod digits;
mod div;
mod float;
mod mul;
mod rescale;
mod round;
mod wide;

pub use decimal::Decimal;
pub use digits::Digits;
pub use round::RoundingMode;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalError {
    #[error("overflow: value too large to represent")]
    Overflow,

    #[error("division by zero")]
    DivideByZero,

    #[error("invalid representation: reserved flag bits set or scale above 28")]
    InvalidRepresentation,

    #[error("invalid string format")]
    InvalidFormat,
}

pub type Result<T> = core::result::Result<T, DecimalError>;

/// Single exit point for every failing operation.
#[cold]
#[inline(never)]
pub(crate) fn fail(error: DecimalError, op: &'static str) -> DecimalError {
    #[cfg(feature = "tracing")]
    tracing::debug!(target: "scaledec", op, %error, "decimal operation failed");
    #[cfg(not(feature = "tracing"))]
    let _ = op;
    error
}
