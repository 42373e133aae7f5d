use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use securand::{ByteSource, Error, RangeParams, SecureGenerator};

/// Byte source that returns the same byte forever and counts invocations.
struct FixedSource {
    byte: u8,
    calls: AtomicU32,
}

impl FixedSource {
    fn new(byte: u8) -> Self {
        Self {
            byte,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ByteSource for FixedSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        dest.fill(self.byte);
        Ok(())
    }

    async fn fill_async(&self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill(dest)
    }
}

/// Byte source that produces misses until `fail_at` calls, then errors.
struct FailAfterSource {
    miss_byte: u8,
    fail_at: u32,
    calls: AtomicU32,
}

impl FailAfterSource {
    fn new(miss_byte: u8, fail_at: u32) -> Self {
        Self {
            miss_byte,
            fail_at,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ByteSource for FailAfterSource {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        if call >= self.fail_at {
            return Err(Error::Source("entropy pool unavailable".into()));
        }

        dest.fill(self.miss_byte);
        Ok(())
    }

    async fn fill_async(&self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill(dest)
    }
}

// [0, 200] needs one byte and mask 255, so 0xFF always misses.
fn always_miss_params() -> RangeParams {
    RangeParams::new(0, 200).unwrap()
}

#[test]
fn test_degenerate_range_returns_min() {
    let params = RangeParams::new(10, 10).unwrap();
    let generator = SecureGenerator::new(params);

    for _ in 0..100 {
        assert_eq!(generator.next_value().unwrap(), 10);
    }
}

#[test]
fn test_degenerate_range_never_consults_source() {
    let params = RangeParams::new(-5, -5).unwrap();
    let source = FixedSource::new(0xFF);
    let generator = SecureGenerator::with_source(params, source, 10);

    assert_eq!(generator.next_value().unwrap(), -5);
    assert_eq!(generator.params().bytes_needed(), 0);
    assert_eq!(generator.source().calls(), 0);
}

#[test]
fn test_draws_stay_in_range_and_cover_it() {
    let params = RangeParams::new(1, 100).unwrap();
    let generator = SecureGenerator::new(params);
    let mut seen = [false; 100];

    for _ in 0..10_000 {
        let value = generator.next_value().unwrap();

        assert!((1..=100).contains(&value));
        seen[(value - 1) as usize] = true;
    }

    // 10k draws over 100 values: missing any one of them is a
    // once-in-the-lifetime-of-the-universe event.
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_negative_range_draws() {
    let params = RangeParams::new(-1000, 1000).unwrap();
    let generator = SecureGenerator::new(params);

    for _ in 0..1000 {
        let value = generator.next_value().unwrap();
        assert!((-1000..=1000).contains(&value));
    }
}

#[test]
fn test_masked_value_is_offset_by_min() {
    let params = RangeParams::new(100, 355).unwrap();
    let source = FixedSource::new(0x2A);
    let generator = SecureGenerator::with_source(params, source, 10);

    // One byte, mask 255: 0x2A folds to 42, offset by min.
    assert_eq!(generator.next_value().unwrap(), 142);
}

#[test]
fn test_multi_byte_little_endian_assembly() {
    // [0, 65535]: two bytes, byte 1 lands at bit offset 8.
    let params = RangeParams::new(0, 65_535).unwrap();
    let source = FixedSource::new(0x01);
    let generator = SecureGenerator::with_source(params, source, 10);

    assert_eq!(generator.next_value().unwrap(), 0x0101);
}

#[test]
fn test_exhaustion_after_exact_attempt_count() {
    let source = FixedSource::new(0xFF);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 7);

    match generator.next_value() {
        Err(Error::TooManyAttempts { attempts }) => assert_eq!(attempts, 7),
        other => panic!("expected TooManyAttempts, got {other:?}"),
    }

    // No more, no fewer: one source call per attempt.
    let source = FixedSource::new(0xFF);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 7);
    let _ = generator.next_value();
    assert_eq!(generator.source().calls(), 7);
}

#[test]
fn test_source_failure_propagates_immediately() {
    let source = FailAfterSource::new(0xFF, 1);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 1000);

    assert!(matches!(generator.next_value(), Err(Error::Source(_))));
}

#[test]
fn test_source_failure_does_not_consume_retries() {
    // Misses twice, then fails: the failure must surface on call 3 even
    // though 997 retries remain.
    let source = FailAfterSource::new(0xFF, 3);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 1000);

    assert!(matches!(generator.next_value(), Err(Error::Source(_))));
    assert_eq!(generator.source().calls(), 3);
}

#[test]
fn test_generator_reusable_after_failed_draw() {
    let source = FixedSource::new(0xFF);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 3);

    assert!(matches!(
        generator.next_value(),
        Err(Error::TooManyAttempts { .. })
    ));

    // The bound applies per draw, so the next draw gets a fresh budget.
    let _ = generator.next_value();
    assert_eq!(generator.source().calls(), 6);
}

#[test]
fn test_sync_sequence_terminates_on_take() {
    let params = RangeParams::new(-1000, 1000).unwrap();
    let generator = SecureGenerator::new(params);

    let values: Vec<i64> = generator
        .values()
        .take(500)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(values.len(), 500);
    assert!(values.iter().all(|v| (-1000..=1000).contains(v)));
}

#[test]
fn test_generator_is_into_iterator() {
    let params = RangeParams::new(1, 6).unwrap();
    let generator = SecureGenerator::new(params);
    let mut count = 0;

    for value in &generator {
        assert!((1..=6).contains(&value.unwrap()));
        count += 1;

        if count == 50 {
            break;
        }
    }

    assert_eq!(count, 50);
}

#[test]
fn test_sequence_yields_error_then_recovers() {
    let source = FailAfterSource::new(0xFF, 1);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 10);
    let mut values = generator.values();

    assert!(matches!(values.next(), Some(Err(Error::Source(_)))));
    // The iterator is not fused by a failure; later pulls draw again.
    assert!(values.next().is_some());
}

#[tokio::test]
async fn test_async_draws_stay_in_range() {
    let params = RangeParams::new(1, 100).unwrap();
    let generator = SecureGenerator::new(params);

    for _ in 0..200 {
        let value = generator.next_value_async().await.unwrap();
        assert!((1..=100).contains(&value));
    }
}

#[tokio::test]
async fn test_async_degenerate_range() {
    let params = RangeParams::new(10, 10).unwrap();
    let generator = SecureGenerator::new(params);

    assert_eq!(generator.next_value_async().await.unwrap(), 10);
}

#[tokio::test]
async fn test_async_exhaustion() {
    let source = FixedSource::new(0xFF);
    let generator = SecureGenerator::with_source(always_miss_params(), source, 5);

    match generator.next_value_async().await {
        Err(Error::TooManyAttempts { attempts }) => assert_eq!(attempts, 5),
        other => panic!("expected TooManyAttempts, got {other:?}"),
    }
}

#[tokio::test]
async fn test_async_sequence_terminates_on_break() {
    let params = RangeParams::new(-1000, 1000).unwrap();
    let generator = SecureGenerator::new(params);
    let mut sequence = generator.values_async();
    let mut collected = Vec::new();

    while collected.len() < 500 {
        let value = sequence.next().await.unwrap();
        assert!((-1000..=1000).contains(&value));
        collected.push(value);
    }

    assert_eq!(collected.len(), 500);
}

#[tokio::test]
async fn test_concurrent_async_draws() {
    let params = RangeParams::new(0, 1_000_000).unwrap();
    let generator = SecureGenerator::new(params);

    let (a, b, c) = tokio::join!(
        generator.next_value_async(),
        generator.next_value_async(),
        generator.next_value_async(),
    );

    for value in [a.unwrap(), b.unwrap(), c.unwrap()] {
        assert!((0..=1_000_000).contains(&value));
    }
}

#[tokio::test]
async fn test_mixed_sync_and_async_on_one_generator() {
    let params = RangeParams::new(1, 6).unwrap();
    let generator = SecureGenerator::new(params);

    let sync_value = generator.next_value().unwrap();
    let async_value = generator.next_value_async().await.unwrap();

    assert!((1..=6).contains(&sync_value));
    assert!((1..=6).contains(&async_value));
}
