//! Secure ranged random number generation.
//!
//! This module contains the crate's core: range validation with mask
//! derivation ([`RangeParams`]) and the rejection-sampling draw engine
//! ([`SecureGenerator`]) together with its infinite sequence views.
//!
//! The split mirrors the two phases of every draw: a pure, one-time
//! computation of the mask geometry, and the repeated request-mask-validate
//! loop against the byte source.

mod generator;
mod params;
mod sequence;

pub use generator::{DEFAULT_MAX_ATTEMPTS, SecureGenerator};
pub use params::{MAX_RANGE, MAX_SAFE_INTEGER, MIN_SAFE_INTEGER, RangeParams};
pub use sequence::{AsyncValues, Values};
