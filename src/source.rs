//! Secure byte source abstraction.
//!
//! The draw engine does not generate entropy itself; it requests raw bytes
//! from a [`ByteSource`] and only performs masking and rejection on top.
//! Keeping the source behind a trait allows the engine to be exercised with
//! deterministic doubles in tests while production code uses the operating
//! system's CSPRNG.
//!
//! Both operations take `&self`: a source must tolerate concurrent
//! invocation, with each call returning its own freshly drawn bytes.

use async_trait::async_trait;

use crate::error::Error;

/// A provider of cryptographically secure random bytes.
///
/// Each call must fill the destination with fresh, independently drawn
/// bytes. Failures are reported as [`Error::Source`] and are never retried
/// by the engine.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Fills `dest` with secure random bytes, blocking the calling thread.
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error>;

    /// Fills `dest` with secure random bytes, suspending instead of
    /// blocking while the bytes are produced.
    async fn fill_async(&self, dest: &mut [u8]) -> Result<(), Error>;
}

/// Byte source backed by the operating system's entropy facility.
///
/// The synchronous path calls [`getrandom::fill`] directly. The
/// asynchronous path offloads the same call to a blocking worker thread so
/// the async executor is never stalled by a slow entropy pool (possible on
/// freshly booted systems).
#[derive(Clone, Copy, Debug, Default)]
pub struct OsByteSource;

impl OsByteSource {
    /// Creates a new OS-backed byte source.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ByteSource for OsByteSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        getrandom::fill(dest).map_err(|e| Error::Source(Box::new(e)))
    }

    async fn fill_async(&self, dest: &mut [u8]) -> Result<(), Error> {
        let len = dest.len();

        let bytes = tokio::task::spawn_blocking(move || {
            let mut buf = vec![0u8; len];
            getrandom::fill(&mut buf).map(|_| buf)
        })
        .await
        .map_err(|e| Error::Source(Box::new(e)))?
        .map_err(|e| Error::Source(Box::new(e)))?;

        dest.copy_from_slice(&bytes);

        Ok(())
    }
}
