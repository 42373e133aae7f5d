//! Error types for range validation and secure draws.
//!
//! Every failure mode of the crate is a variant of a single closed enum,
//! so callers distinguish conditions by matching on a kind rather than by
//! inspecting message text. The internal "candidate out of range" miss is
//! deliberately *not* represented here: it is retried inside the draw loop
//! and only its exhaustion surfaces, as [`Error::TooManyAttempts`].

use thiserror::Error;

/// Failures produced by range validation and by secure draws.
///
/// Validation variants are only ever produced while constructing
/// [`RangeParams`](crate::RangeParams) and are fatal to that construction
/// attempt. `TooManyAttempts` and `Source` are produced by draws; a failed
/// draw leaves its generator intact and reusable.
#[derive(Debug, Error)]
pub enum Error {
    /// No minimum value was supplied.
    #[error("you must specify a minimum value")]
    MissingMin,

    /// No maximum value was supplied.
    #[error("you must specify a maximum value")]
    MissingMax,

    /// The minimum value has a fractional component.
    #[error("minimum value must be an integer")]
    MinNotInteger,

    /// The maximum value has a fractional component.
    #[error("maximum value must be an integer")]
    MaxNotInteger,

    /// The minimum value is below the safe-integer floor, -(2^53 - 1).
    #[error("minimum value must be greater than or equal to -(2^53 - 1)")]
    MinTooSmall,

    /// The minimum value is above the safe-integer ceiling, 2^53 - 1.
    #[error("minimum value must be less than or equal to 2^53 - 1")]
    MinTooLarge,

    /// The maximum value is below the safe-integer floor, -(2^53 - 1).
    #[error("maximum value must be greater than or equal to -(2^53 - 1)")]
    MaxTooSmall,

    /// The maximum value is above the safe-integer ceiling, 2^53 - 1.
    #[error("maximum value must be less than or equal to 2^53 - 1")]
    MaxTooLarge,

    /// The maximum value is less than the minimum value.
    #[error("maximum value must be greater than or equal to minimum value")]
    MaxLessThanMin,

    /// The span between minimum and maximum exceeds what the byte-based
    /// mask can address, 2^32 - 1.
    #[error("difference between min & max must not exceed 2^32 - 1")]
    RangeNotSafe,

    /// The retry bound was exhausted without an in-range candidate.
    #[error("no in-range random value found within {attempts} attempts")]
    TooManyAttempts {
        /// The bound that was exhausted.
        attempts: u32,
    },

    /// The secure byte source failed. The underlying error is passed
    /// through unchanged; the engine never retries on source failure.
    #[error("secure byte source failure: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),
}
