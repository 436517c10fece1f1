// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use seqflux_core::{Result, SeqfluxError, StreamItem};
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Pulls the next value, failing if nothing arrives within `timeout_ms`.
///
/// # Errors
///
/// Returns the stream's own error, or a `StreamProcessingError` when the stream
/// ended or timed out.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> Result<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item.into_result(),
        Ok(None) => Err(SeqfluxError::stream_error("Stream ended")),
        Err(_) => Err(SeqfluxError::stream_error(format!(
            "No item within {timeout_ms}ms"
        ))),
    }
}

/// Panics if the stream emits anything (value, error or completion) within `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected signal emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Asserts that `actual` is a permutation of `expected`.
///
/// Used for unordered expansions, where only the multiset is stable.
pub fn assert_same_multiset<T>(actual: &[T], expected: &[T])
where
    T: Ord + Clone + Debug,
{
    let mut actual_sorted = actual.to_vec();
    let mut expected_sorted = expected.to_vec();
    actual_sorted.sort();
    expected_sorted.sort();

    assert_eq!(
        actual_sorted, expected_sorted,
        "expected a permutation of {expected:?}, got {actual:?}"
    );
}

/// A random delay in `0..max_ms` milliseconds.
pub fn random_delay(max_ms: u64) -> Duration {
    Duration::from_millis(fastrand::u64(0..max_ms.max(1)))
}
