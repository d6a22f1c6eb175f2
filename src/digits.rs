//! Digit-sequence interop and the text surface built on it.
//!
//! A value is exchanged with formatters and parsers as its raw decimal
//! digits, a scale and a sign. `Display` and `FromStr` are thin, invariant
//! renderings of that form with no locale handling.

use core::fmt::{self, Write};
use core::str::FromStr;

use crate::decimal::Decimal;
use crate::rescale::{MAX_SCALE, round_up};
use crate::wide::U96;
use crate::{DecimalError, Result, fail};

/// Digits in the largest mantissa, 79228162514264337593543950335.
const MAX_DIGITS: usize = 29;

/// Raw decimal digits of a mantissa (most significant first, no leading
/// zeros, zero is a single `0`), with the scale and sign of the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digits {
    buf: [u8; MAX_DIGITS],
    len: u8,
    scale: u8,
    negative: bool,
}

impl Digits {
    /// Digit values `0..=9`, not ASCII.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// Number of digits after the decimal point. May exceed the digit count,
    /// in which case the missing leading digits are zeros.
    #[inline(always)]
    pub const fn scale(&self) -> u32 {
        self.scale as u32
    }

    /// Never set for zero.
    #[inline(always)]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }
}

/// Feeds digits most significant first. Integer digits must fit; fractional
/// digits past 96 bits or past scale 28 are dropped, remembering the first
/// dropped digit and whether any later one was non-zero.
struct DigitAccumulator {
    mantissa: U96,
    scale: u32,
    round_digit: Option<u8>,
    sticky: bool,
}

impl DigitAccumulator {
    const fn new() -> Self {
        Self {
            mantissa: U96::ZERO,
            scale: 0,
            round_digit: None,
            sticky: false,
        }
    }

    /// `mantissa * 10 + digit`, or `None` past 96 bits.
    #[inline(always)]
    fn shifted_in(&self, digit: u8) -> Option<U96> {
        let mut next = self.mantissa;
        if next.mul_small(10) != 0 || next.add_small(digit as u32) {
            return None;
        }
        Some(next)
    }

    fn push_integer(&mut self, digit: u8) -> Result<()> {
        self.mantissa = self
            .shifted_in(digit)
            .ok_or_else(|| fail(DecimalError::Overflow, "from_digits"))?;
        Ok(())
    }

    fn push_fraction(&mut self, digit: u8) {
        if self.round_digit.is_none() && self.scale < MAX_SCALE {
            if let Some(next) = self.shifted_in(digit) {
                self.mantissa = next;
                self.scale += 1;
                return;
            }
        }
        match self.round_digit {
            None => self.round_digit = Some(digit),
            Some(_) => self.sticky |= digit != 0,
        }
    }

    fn finish(mut self, negative: bool) -> Result<Decimal> {
        let mut scale = self.scale as i32;
        if let Some(digit) = self.round_digit {
            if digit > 5 || (digit == 5 && (self.sticky || self.mantissa.lo() & 1 == 1)) {
                scale = round_up(&mut self.mantissa, scale)?;
            }
        }
        Ok(Decimal::canonical(self.mantissa, scale as u32, negative))
    }
}

// ============================================================================
// Digit Interop
// ============================================================================

impl Decimal {
    /// Splits the value into its mantissa digits, scale and sign.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaledec::Decimal;
    ///
    /// let d = Decimal::try_new(-1_200, 3).unwrap();
    /// let digits = d.to_digits();
    /// assert_eq!(digits.as_slice(), &[1, 2, 0, 0]);
    /// assert_eq!(digits.scale(), 3);
    /// assert!(digits.is_negative());
    /// ```
    pub fn to_digits(&self) -> Digits {
        let mut buf = [0u8; MAX_DIGITS];
        let mut pos = MAX_DIGITS;
        let mut mantissa = self.mantissa;
        loop {
            let mut chunk = mantissa.div_small(1_000_000_000);
            if mantissa.is_zero() {
                // Leading chunk: no zero padding.
                loop {
                    pos -= 1;
                    buf[pos] = (chunk % 10) as u8;
                    chunk /= 10;
                    if chunk == 0 {
                        break;
                    }
                }
                break;
            }
            for _ in 0..9 {
                pos -= 1;
                buf[pos] = (chunk % 10) as u8;
                chunk /= 10;
            }
        }
        buf.copy_within(pos.., 0);

        Digits {
            buf,
            len: (MAX_DIGITS - pos) as u8,
            scale: self.scale,
            negative: self.negative && !self.mantissa.is_zero(),
        }
    }

    /// Assembles a value from pre-parsed digits (values `0..=9`, most
    /// significant first), a scale and a sign. The value is
    /// `digits / 10^scale`; any scale is accepted.
    ///
    /// Fractional digits that do not fit 96 bits or scale 28 are rounded away
    /// half-to-even. Trailing zeros that fit are kept.
    ///
    /// # Errors
    ///
    /// - [`DecimalError::InvalidRepresentation`] if a digit is above 9
    /// - [`DecimalError::Overflow`] if the integer digits do not fit 96 bits
    pub fn from_digits(digits: &[u8], scale: u32, negative: bool) -> Result<Self> {
        if digits.iter().any(|&digit| digit > 9) {
            return Err(fail(DecimalError::InvalidRepresentation, "from_digits"));
        }
        let scale = scale as usize;
        let int_len = digits.len().saturating_sub(scale);
        // Zeros between the point and the first digit. Past 29 of them every
        // real digit is dropped whatever the count.
        let implied = scale.saturating_sub(digits.len()).min(MAX_DIGITS);

        let mut acc = DigitAccumulator::new();
        for &digit in &digits[..int_len] {
            acc.push_integer(digit)?;
        }
        for _ in 0..implied {
            acc.push_fraction(0);
        }
        for &digit in &digits[int_len..] {
            acc.push_fraction(digit);
        }
        acc.finish(negative)
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Writes the unsigned plain notation of `digits` and returns its length.
fn format_to_buffer(digits: &Digits, buffer: &mut [u8; 40]) -> usize {
    let d = digits.as_slice();
    let n = d.len();
    let scale = digits.scale as usize;
    let mut pos = 0;

    if n > scale {
        for &digit in &d[..n - scale] {
            buffer[pos] = b'0' + digit;
            pos += 1;
        }
    } else {
        buffer[pos] = b'0';
        pos += 1;
    }

    if scale > 0 {
        buffer[pos] = b'.';
        pos += 1;
        for _ in n..scale {
            buffer[pos] = b'0';
            pos += 1;
        }
        for &digit in &d[n.saturating_sub(scale)..] {
            buffer[pos] = b'0' + digit;
            pos += 1;
        }
    }
    pos
}

impl Decimal {
    /// `{:.N}`: rounds half-to-even to at most 28 places, then pads with
    /// zeros up to `N`.
    fn fmt_with_precision(&self, f: &mut fmt::Formatter<'_>, precision: usize) -> fmt::Result {
        let places = precision.min(MAX_SCALE as usize) as u32;
        let rounded = self.round_dp(places);
        let digits = rounded.to_digits();

        let mut buffer = [0u8; 40];
        let len = format_to_buffer(&digits, &mut buffer);
        if digits.is_negative() {
            f.write_char('-')?;
        }
        // SAFETY: the buffer only holds ASCII digits and '.'
        f.write_str(unsafe { core::str::from_utf8_unchecked(&buffer[..len]) })?;

        let written = digits.scale() as usize;
        if precision > written && written == 0 {
            f.write_char('.')?;
        }
        for _ in written..precision {
            f.write_char('0')?;
        }
        Ok(())
    }
}

impl fmt::Display for Decimal {
    /// Plain notation with every stored digit, so `1.200` keeps its zeros.
    /// Zero never shows a sign.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            return self.fmt_with_precision(f, precision);
        }

        let digits = self.to_digits();
        let mut buffer = [0u8; 40];
        let len = format_to_buffer(&digits, &mut buffer);
        // SAFETY: the buffer only holds ASCII digits and '.'
        let s = unsafe { core::str::from_utf8_unchecked(&buffer[..len]) };
        f.pad_integral(!digits.is_negative(), "", s)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("Decimal")
                .field("mantissa", &self.unsigned_mantissa())
                .field("scale", &self.scale)
                .field("negative", &self.negative)
                .finish()
        } else {
            write!(f, "Decimal({})", self)
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Parses `[+-]digits[.digits]`, surrounding whitespace allowed. Either
    /// side of the point may be empty but not both, and a point must be
    /// followed by at least one digit. Excess fractional digits are rounded
    /// half-to-even.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.trim().as_bytes();
        let (negative, body) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            Some(b'+') => (false, &bytes[1..]),
            _ => (false, bytes),
        };
        let (int_part, frac_part, has_point) = match body.iter().position(|&b| b == b'.') {
            Some(dot) => (&body[..dot], &body[dot + 1..], true),
            None => (body, &body[body.len()..], false),
        };

        if (int_part.is_empty() && frac_part.is_empty())
            || (has_point && frac_part.is_empty())
            || !int_part.iter().chain(frac_part).all(u8::is_ascii_digit)
        {
            return Err(fail(DecimalError::InvalidFormat, "from_str"));
        }

        let mut acc = DigitAccumulator::new();
        for &b in int_part {
            acc.push_integer(b - b'0')?;
        }
        for &b in frac_part {
            acc.push_fraction(b - b'0');
        }
        acc.finish(negative)
    }
}

impl TryFrom<&str> for Decimal {
    type Error = DecimalError;

    #[inline(always)]
    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}
