//! Range validation and bit-mask derivation.
//!
//! This module holds the arithmetic core of the crate: turning an inclusive
//! `[min, max]` range into the minimal bit mask and byte count a draw needs.
//!
//! The derivation is the equivalent of
//!
//! ```text
//! bits_needed  = ceil(log2(range + 1))
//! bytes_needed = ceil(bits_needed / 8)
//! mask         = 2^bits_needed - 1
//! ```
//!
//! implemented with bitwise operations on `u64` rather than floating-point
//! logarithms, so the result is exact for every admissible range. All
//! shifts are logical: a sign-propagating shift on a value near the top of
//! the range would smear the sign bit into the mask and corrupt it.

use crate::error::Error;

/// Largest integer magnitude that survives an IEEE-754 double round-trip
/// without precision loss, 2^53 - 1.
///
/// Bounds are restricted to this window so that values exchanged with
/// double-based callers (JSON, FFI, scripting hosts) are always exact.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Smallest admissible bound, -(2^53 - 1).
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

/// Widest admissible span between `min` and `max`, 2^32 - 1.
///
/// Four bytes of entropy per attempt address this span exactly; anything
/// wider would need a fifth byte and a wider accumulator.
pub const MAX_RANGE: u64 = u32::MAX as u64;

/// Validated range bounds together with the derived mask geometry.
///
/// Construction validates the bounds and pre-computes everything a draw
/// needs; the value is immutable afterwards, so any number of concurrent
/// draws may read it without synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeParams {
    min: i64,
    max: i64,
    range: u64,
    bits_needed: u32,
    bytes_needed: usize,
    mask: u64,
}

impl RangeParams {
    /// Validates `min` and `max` and derives the mask geometry.
    ///
    /// Checks are applied in a fixed order, first failure wins: the
    /// safe-integer window on `min`, the same window on `max`, the bound
    /// ordering, and finally the span limit [`MAX_RANGE`].
    ///
    /// # Errors
    ///
    /// `MinTooSmall`, `MinTooLarge`, `MaxTooSmall`, `MaxTooLarge`,
    /// `MaxLessThanMin` or `RangeNotSafe`.
    pub fn new(min: i64, max: i64) -> Result<Self, Error> {
        if min < MIN_SAFE_INTEGER {
            return Err(Error::MinTooSmall);
        }

        if min > MAX_SAFE_INTEGER {
            return Err(Error::MinTooLarge);
        }

        if max < MIN_SAFE_INTEGER {
            return Err(Error::MaxTooSmall);
        }

        if max > MAX_SAFE_INTEGER {
            return Err(Error::MaxTooLarge);
        }

        if max < min {
            return Err(Error::MaxLessThanMin);
        }

        // Both bounds fit in 54 bits, so the difference cannot overflow.
        let range = (max - min) as u64;

        if range > MAX_RANGE {
            return Err(Error::RangeNotSafe);
        }

        let (bits_needed, bytes_needed, mask) = derive(range);

        Ok(Self {
            min,
            max,
            range,
            bits_needed,
            bytes_needed,
            mask,
        })
    }

    /// Validates loosely-typed numeric bounds, then delegates to
    /// [`RangeParams::new`].
    ///
    /// Intended for callers whose input arrives untyped (configuration,
    /// parsed JSON, FFI), where a bound may be absent or carry a
    /// fractional component. Absence and non-integer checks happen first,
    /// `max` before `min` in each pair; a non-finite value counts as
    /// non-integer.
    ///
    /// # Errors
    ///
    /// `MissingMax`, `MissingMin`, `MaxNotInteger`, `MinNotInteger`, or
    /// anything [`RangeParams::new`] reports.
    pub fn from_parts(min: Option<f64>, max: Option<f64>) -> Result<Self, Error> {
        let max = max.ok_or(Error::MissingMax)?;
        let min = min.ok_or(Error::MissingMin)?;

        if !max.is_finite() || max.fract() != 0.0 {
            return Err(Error::MaxNotInteger);
        }

        if !min.is_finite() || min.fract() != 0.0 {
            return Err(Error::MinNotInteger);
        }

        // The safe-integer window is checked on the doubles so that
        // magnitudes beyond i64 cannot wrap during conversion.
        if min < MIN_SAFE_INTEGER as f64 {
            return Err(Error::MinTooSmall);
        }

        if min > MAX_SAFE_INTEGER as f64 {
            return Err(Error::MinTooLarge);
        }

        if max < MIN_SAFE_INTEGER as f64 {
            return Err(Error::MaxTooSmall);
        }

        if max > MAX_SAFE_INTEGER as f64 {
            return Err(Error::MaxTooLarge);
        }

        Self::new(min as i64, max as i64)
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Inclusive upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Span of the range, `max - min`.
    pub fn range(&self) -> u64 {
        self.range
    }

    /// Number of significant bits in `range`.
    pub fn bits_needed(&self) -> u32 {
        self.bits_needed
    }

    /// Number of bytes a draw must request from the byte source.
    pub fn bytes_needed(&self) -> usize {
        self.bytes_needed
    }

    /// Smallest all-ones mask covering `range`.
    ///
    /// Satisfies `mask >= range` and `mask < 2 * (range + 1)`, which is
    /// what keeps the per-attempt miss probability below one half.
    pub fn mask(&self) -> u64 {
        self.mask
    }
}

/// Derives `(bits_needed, bytes_needed, mask)` for a span.
///
/// Consumes the working copy of `range` one bit at a time, growing the
/// mask in lockstep, so `mask` ends up as `2^bits - 1` for the bit length
/// of `range`. A zero span yields `(0, 0, 0)`: the only candidate is `min`
/// itself and no bytes are ever requested for it.
fn derive(range: u64) -> (u32, usize, u64) {
    let mut bits_needed = 0u32;
    let mut bytes_needed = 0usize;
    let mut mask = 0u64;
    let mut work = range;

    while work > 0 {
        if bits_needed % 8 == 0 {
            bytes_needed += 1;
        }

        bits_needed += 1;
        mask = mask << 1 | 1;
        work >>= 1;
    }

    (bits_needed, bytes_needed, mask)
}
