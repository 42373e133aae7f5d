//! Infinite lazy views over a generator.
//!
//! Two distinct adapter types, one per call kind, so code committing to a
//! synchronous or asynchronous path keeps compile-time clarity instead of
//! going through one dynamically dispatched view. Both borrow the owning
//! generator and carry no state of their own: every element is an
//! independent draw, and a failed pull does not poison later pulls.

use crate::error::Error;
use crate::rng::generator::SecureGenerator;
use crate::source::ByteSource;

/// Unbounded synchronous sequence of draws.
///
/// `next` never returns `None`; consumers stop by ceasing to pull
/// (`take`, `break`, ...). A draw failure surfaces as an `Err` element.
#[derive(Debug)]
pub struct Values<'g, S: ByteSource> {
    generator: &'g SecureGenerator<S>,
}

impl<'g, S: ByteSource> Values<'g, S> {
    pub(crate) fn new(generator: &'g SecureGenerator<S>) -> Self {
        Self { generator }
    }
}

impl<S: ByteSource> Iterator for Values<'_, S> {
    type Item = Result<i64, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.next_value())
    }
}

impl<'g, S: ByteSource> IntoIterator for &'g SecureGenerator<S> {
    type Item = Result<i64, Error>;
    type IntoIter = Values<'g, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

/// Unbounded asynchronous sequence of draws.
///
/// The asynchronous twin of [`Values`]: each `next().await` performs one
/// independent draw. There is no end-of-sequence signal, so `next` returns
/// the draw result directly rather than wrapping it in an `Option`.
#[derive(Debug)]
pub struct AsyncValues<'g, S: ByteSource> {
    generator: &'g SecureGenerator<S>,
}

impl<'g, S: ByteSource> AsyncValues<'g, S> {
    pub(crate) fn new(generator: &'g SecureGenerator<S>) -> Self {
        Self { generator }
    }

    /// Pulls the next element, suspending at the byte source.
    ///
    /// # Errors
    ///
    /// Propagates the underlying draw's [`Error::TooManyAttempts`] or
    /// [`Error::Source`]; the sequence stays usable afterwards.
    pub async fn next(&mut self) -> Result<i64, Error> {
        self.generator.next_value_async().await
    }
}
