// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream;
use seqflux_core::StreamItem;
use seqflux_test_utils::names::{names, split_chars, upper_names, NAMES};
use seqflux_test_utils::{
    assert_no_element_emitted, assert_same_multiset, random_delay, test_channel, unwrap_stream,
    ErrorInjectingStream,
};
use std::time::Duration;

#[tokio::test]
async fn test_unwrap_stream_reports_end_of_stream() {
    let mut empty = stream::empty::<StreamItem<i32>>();

    let result = unwrap_stream(&mut empty, 50).await;

    assert!(result.unwrap_err().to_string().contains("Stream ended"));
}

#[tokio::test]
async fn test_unwrap_stream_times_out() {
    let mut pending = stream::pending::<StreamItem<i32>>();

    let result = unwrap_stream(&mut pending, 20).await;

    assert!(result.unwrap_err().to_string().contains("No item within"));
}

#[tokio::test]
async fn test_channel_wraps_values() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<String>();
    let mut stream = Box::pin(stream);

    // Act
    tx.send("Erick".to_string())?;

    // Assert
    assert_eq!(unwrap_stream(&mut stream, 100).await?, "Erick");
    assert_no_element_emitted(&mut stream, 20).await;

    Ok(())
}

#[tokio::test]
async fn test_error_injection_at_start() -> anyhow::Result<()> {
    let mut stream = ErrorInjectingStream::new(stream::iter(vec![1, 2]), 0);

    assert!(unwrap_stream(&mut stream, 50).await.is_err());
    assert_eq!(unwrap_stream(&mut stream, 50).await?, 1);
    assert_eq!(unwrap_stream(&mut stream, 50).await?, 2);

    Ok(())
}

#[test]
fn test_name_fixtures() {
    assert_eq!(names().values(), NAMES.map(String::from).as_slice());
    assert_eq!(upper_names()[1], "CHARLES");
    assert_eq!(split_chars("Jm"), vec!["J", "m"]);
}

#[test]
fn test_assert_same_multiset_ignores_order() {
    assert_same_multiset(&["b", "a", "b"], &["a", "b", "b"]);
}

#[test]
#[should_panic(expected = "expected a permutation")]
fn test_assert_same_multiset_detects_missing_items() {
    assert_same_multiset(&["a", "b"], &["a", "b", "b"]);
}

#[test]
fn test_random_delay_is_bounded() {
    for _ in 0..100 {
        assert!(random_delay(5) < Duration::from_millis(5));
    }
    assert_eq!(random_delay(0), Duration::ZERO);
}
