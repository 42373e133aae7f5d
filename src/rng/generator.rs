//! Rejection-sampling draw engine.
//!
//! A [`SecureGenerator`] owns validated [`RangeParams`], a byte source and
//! a retry bound. Each draw requests the minimal number of bytes, folds
//! them into an integer, masks off the excess high bits and accepts the
//! candidate only if it lands inside the range.
//!
//! Masking instead of reducing modulo the range is the entire point: a
//! modulo reduction is biased whenever `range + 1` does not evenly divide
//! the byte-width space, while the mask keeps every value in `[0, mask]`
//! equally likely. Because the mask never exceeds twice the range, each
//! attempt accepts with probability above one half and the expected number
//! of attempts stays below two.

use crate::error::Error;
use crate::rng::params::RangeParams;
use crate::rng::sequence::{AsyncValues, Values};
use crate::source::{ByteSource, OsByteSource};

/// Retry bound applied when none is given explicitly.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Draws uniformly distributed integers from a fixed inclusive range.
///
/// The generator is immutable after construction: draws take `&self`,
/// share no mutable state, and may run concurrently. A failed draw leaves
/// the generator fully usable for subsequent draws.
#[derive(Clone, Debug)]
pub struct SecureGenerator<S: ByteSource = OsByteSource> {
    params: RangeParams,
    source: S,
    max_attempts: u32,
}

impl SecureGenerator<OsByteSource> {
    /// Creates a generator over OS entropy with the default retry bound.
    pub fn new(params: RangeParams) -> Self {
        Self::with_max_attempts(params, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a generator over OS entropy with an explicit retry bound.
    ///
    /// The bound exists to turn a pathological miss streak into an error
    /// instead of an unbounded loop; since each attempt accepts with
    /// probability above one half, even small bounds are effectively
    /// never exhausted against an honest byte source.
    pub fn with_max_attempts(params: RangeParams, max_attempts: u32) -> Self {
        Self::with_source(params, OsByteSource::new(), max_attempts)
    }
}

impl<S: ByteSource> SecureGenerator<S> {
    /// Creates a generator over a caller-supplied byte source.
    pub fn with_source(params: RangeParams, source: S, max_attempts: u32) -> Self {
        Self {
            params,
            source,
            max_attempts,
        }
    }

    /// The validated range parameters this generator draws from.
    pub fn params(&self) -> &RangeParams {
        &self.params
    }

    /// The retry bound applied to every draw.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The byte source this generator draws from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Draws one value, blocking the calling thread at the byte source.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyAttempts`] if the retry bound is exhausted,
    /// [`Error::Source`] if the byte source fails.
    pub fn next_value(&self) -> Result<i64, Error> {
        if self.params.range() == 0 {
            return Ok(self.params.min());
        }

        let mut buf = [0u8; 4];
        let wanted = &mut buf[..self.params.bytes_needed()];

        for _ in 0..self.max_attempts {
            self.source.fill(wanted)?;

            if let Some(value) = self.accept(wanted) {
                return Ok(value);
            }
        }

        Err(Error::TooManyAttempts {
            attempts: self.max_attempts,
        })
    }

    /// Draws one value, suspending at the byte source instead of blocking.
    ///
    /// Identical to [`next_value`](Self::next_value) in masking,
    /// validation and retry behavior; only the byte-source call differs.
    ///
    /// # Errors
    ///
    /// [`Error::TooManyAttempts`] if the retry bound is exhausted,
    /// [`Error::Source`] if the byte source fails.
    pub async fn next_value_async(&self) -> Result<i64, Error> {
        if self.params.range() == 0 {
            return Ok(self.params.min());
        }

        let mut buf = [0u8; 4];
        let wanted = &mut buf[..self.params.bytes_needed()];

        for _ in 0..self.max_attempts {
            self.source.fill_async(wanted).await?;

            if let Some(value) = self.accept(wanted) {
                return Ok(value);
            }
        }

        Err(Error::TooManyAttempts {
            attempts: self.max_attempts,
        })
    }

    /// Infinite synchronous view: every pull is an independent
    /// [`next_value`](Self::next_value) call.
    pub fn values(&self) -> Values<'_, S> {
        Values::new(self)
    }

    /// Infinite asynchronous view: every pull is an independent
    /// [`next_value_async`](Self::next_value_async) call.
    pub fn values_async(&self) -> AsyncValues<'_, S> {
        AsyncValues::new(self)
    }

    /// Folds freshly drawn bytes into a candidate and validates it.
    ///
    /// Bytes accumulate little-endian (byte `i` at bit offset `8 * i`)
    /// into a `u64`, so no shift ever touches the sign bit. Returns `None`
    /// on a range miss; the caller decides whether to retry.
    fn accept(&self, bytes: &[u8]) -> Option<i64> {
        let mut value = 0u64;

        for (i, byte) in bytes.iter().enumerate() {
            value |= (*byte as u64) << (8 * i);
        }

        value &= self.params.mask();

        // value <= mask <= 2^32 - 1 and min >= -(2^53 - 1): cannot overflow.
        let candidate = self.params.min() + value as i64;

        (candidate >= self.params.min() && candidate <= self.params.max()).then_some(candidate)
    }
}
