// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use seqflux_core::{Item, SeqfluxError, StreamItem};
use seqflux_exec::DrainExt;
use seqflux_stream::DelayElementsExt;
use seqflux_test_utils::names::{char_sequence, names};
use seqflux_test_utils::{assert_no_element_emitted, test_channel_with_errors, unwrap_stream};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_delay_elements_delays_each_value_in_turn() -> anyhow::Result<()> {
    // Arrange
    let start = Instant::now();

    // Act
    let result = char_sequence("Madronero")
        .delay_elements(Duration::from_millis(1000))
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(result.concat(), "Madronero");
    assert!(start.elapsed() >= Duration::from_millis(9000));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delay_elements_holds_value_until_delay_elapses() -> anyhow::Result<()> {
    // Arrange
    let mut stream = Box::pin(names().produce().delay_elements(Duration::from_millis(100)));

    // Act & Assert
    assert_no_element_emitted(&mut stream, 50).await;
    assert_eq!(unwrap_stream(&mut stream, 100).await?, "AJ");
    assert_eq!(unwrap_stream(&mut stream, 150).await?, "Charles");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delay_elements_passes_errors_immediately() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<Item>();
    let mut stream = Box::pin(stream.delay_elements(Duration::from_secs(10)));
    let start = Instant::now();

    // Act
    tx.send(StreamItem::Error(SeqfluxError::stream_error("boom")))?;
    tx.send(StreamItem::Value("Jm".to_string()))?;

    // Assert
    assert!(unwrap_stream(&mut stream, 10).await.is_err());
    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(stream.next().await.is_none());

    Ok(())
}
