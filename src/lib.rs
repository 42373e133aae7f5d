//! Unbiased secure random integers within an inclusive range
//!
//! This crate draws uniformly distributed random integers in `[min, max]`
//! from a cryptographically secure byte source, without the statistical
//! bias that naive modulo reduction introduces. It is intended for callers
//! where the distribution itself is security-relevant (token generation,
//! sampling, secret selection) and correctness matters more than raw
//! throughput.
//!
//! The technique is bit-mask rejection sampling: from the range span,
//! derive the smallest all-ones bit mask covering it; draw that many
//! random bytes; mask off the excess high bits; accept the result only if
//! it falls inside the range, retrying otherwise. The mask guarantees each
//! attempt accepts with probability above one half, so the expected number
//! of attempts is below two, and a configurable attempt bound turns a
//! pathological streak into an error rather than an unbounded loop.
//!
//! # Module overview
//!
//! - `rng`
//!   The core: [`RangeParams`] (validation and mask derivation) and
//!   [`SecureGenerator`] (the draw engine, with synchronous and
//!   asynchronous draws plus infinite lazy sequence views of each kind).
//!
//! - `source`
//!   The [`ByteSource`] abstraction the engine draws raw bytes from, and
//!   [`OsByteSource`], its OS-entropy implementation.
//!
//! - `error`
//!   The closed [`Error`] enum covering validation failures, retry
//!   exhaustion, and byte-source failures.
//!
//! # Usage
//!
//! One-shot:
//!
//! ```no_run
//! let roll = securand::random_int(1, 6)?;
//! assert!((1..=6).contains(&roll));
//! # Ok::<(), securand::Error>(())
//! ```
//!
//! Reusing one generator for many draws in the same range:
//!
//! ```no_run
//! use securand::{RangeParams, SecureGenerator};
//!
//! let params = RangeParams::new(1, 100)?;
//! let generator = SecureGenerator::new(params);
//!
//! let first = generator.next_value()?;
//! for value in generator.values().take(10) {
//!     let value = value?;
//!     assert!((1..=100).contains(&value));
//! }
//! # Ok::<(), securand::Error>(())
//! ```
//!
//! # Design goals
//!
//! - Exact, bias-free distribution over the requested range
//! - Explicit, closed error taxonomy; nothing logged or swallowed
//! - No mutable generator state: draws are independent and safe to issue
//!   concurrently
//! - Byte source behind a trait, so the engine is testable without OS
//!   entropy

mod error;
mod source;

pub mod rng;

pub use error::Error;
pub use rng::{
    AsyncValues, DEFAULT_MAX_ATTEMPTS, MAX_RANGE, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER, RangeParams,
    SecureGenerator, Values,
};
pub use source::{ByteSource, OsByteSource};

use rand::Rng;

/// Draws one secure random integer in `[min, max]`, blocking.
///
/// Convenience wrapper that validates the range, builds a generator over
/// OS entropy with [`DEFAULT_MAX_ATTEMPTS`], and draws once. Callers
/// needing several values in the same range should build a
/// [`SecureGenerator`] and reuse it instead.
///
/// # Errors
///
/// Any validation error from [`RangeParams::new`], plus
/// [`Error::TooManyAttempts`] and [`Error::Source`].
pub fn random_int(min: i64, max: i64) -> Result<i64, Error> {
    random_int_with_attempts(min, max, DEFAULT_MAX_ATTEMPTS)
}

/// Draws one secure random integer in `[min, max]` with a caller-supplied
/// retry bound, blocking.
///
/// Like [`random_int`], but the per-draw attempt bound is explicit; on
/// exhaustion the supplied bound is reported back in
/// [`Error::TooManyAttempts`].
///
/// # Errors
///
/// Any validation error from [`RangeParams::new`], plus
/// [`Error::TooManyAttempts`] and [`Error::Source`].
pub fn random_int_with_attempts(min: i64, max: i64, max_attempts: u32) -> Result<i64, Error> {
    let params = RangeParams::new(min, max)?;

    SecureGenerator::with_max_attempts(params, max_attempts).next_value()
}

/// Draws one secure random integer in `[min, max]`, suspending at the
/// byte source instead of blocking.
///
/// The asynchronous twin of [`random_int`], with identical validation,
/// masking and retry behavior.
///
/// # Errors
///
/// Any validation error from [`RangeParams::new`], plus
/// [`Error::TooManyAttempts`] and [`Error::Source`].
pub async fn random_int_async(min: i64, max: i64) -> Result<i64, Error> {
    random_int_async_with_attempts(min, max, DEFAULT_MAX_ATTEMPTS).await
}

/// Draws one secure random integer in `[min, max]` with a caller-supplied
/// retry bound, suspending at the byte source.
///
/// The asynchronous twin of [`random_int_with_attempts`].
///
/// # Errors
///
/// Any validation error from [`RangeParams::new`], plus
/// [`Error::TooManyAttempts`] and [`Error::Source`].
pub async fn random_int_async_with_attempts(
    min: i64,
    max: i64,
    max_attempts: u32,
) -> Result<i64, Error> {
    let params = RangeParams::new(min, max)?;

    SecureGenerator::with_max_attempts(params, max_attempts)
        .next_value_async()
        .await
}

/// Draws one random integer in `[min, max]` from an ordinary,
/// **non-secure** pseudo-random source.
///
/// This is the fast path for callers that only need a plausible spread:
/// no secure entropy, no safe-range limit, no mask logic. Never use it
/// where an attacker predicting the output matters.
///
/// # Errors
///
/// [`Error::MaxLessThanMin`] if `max < min`.
pub fn fast_random_int(min: i64, max: i64) -> Result<i64, Error> {
    if max < min {
        return Err(Error::MaxLessThanMin);
    }

    Ok(rand::rng().random_range(min..=max))
}

/// Draws one **non-secure** random integer from loosely-typed bounds.
///
/// The untyped-input twin of [`fast_random_int`], for callers whose
/// bounds arrive as optional doubles (configuration, parsed JSON, FFI):
/// a bound may be absent or carry a fractional component, and those
/// checks apply in the same order as on
/// [`RangeParams::from_parts`] — `max` before `min` in each pair, a
/// non-finite value counting as non-integer. No safe-integer window or
/// span limit applies; magnitudes beyond `i64` saturate.
///
/// # Errors
///
/// `MissingMax`, `MissingMin`, `MaxNotInteger`, `MinNotInteger`, or
/// [`Error::MaxLessThanMin`].
pub fn fast_random_int_from_parts(min: Option<f64>, max: Option<f64>) -> Result<i64, Error> {
    let max = max.ok_or(Error::MissingMax)?;
    let min = min.ok_or(Error::MissingMin)?;

    if !max.is_finite() || max.fract() != 0.0 {
        return Err(Error::MaxNotInteger);
    }

    if !min.is_finite() || min.fract() != 0.0 {
        return Err(Error::MinNotInteger);
    }

    // Both are finite integral doubles; the casts saturate and preserve
    // ordering, so the ordering check below still sees max >= min.
    fast_random_int(min as i64, max as i64)
}
