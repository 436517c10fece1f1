// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use seqflux_core::{SeqfluxError, Sequence, StreamItem};
use seqflux_exec::DrainExt;
use seqflux_stream::{FilterItemsExt, MapItemsExt};
use seqflux_test_utils::names::names;
use seqflux_test_utils::{test_channel_with_errors, unwrap_stream};

#[tokio::test]
async fn test_filter_items_keeps_long_names() -> anyhow::Result<()> {
    // Arrange
    let source = names();

    // Act
    let result = source
        .produce()
        .filter_items(|name| name.len() > 3)
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(result, vec!["Charles", "Erick", "Jerome"]);

    Ok(())
}

#[tokio::test]
async fn test_filter_items_short_names() -> anyhow::Result<()> {
    let result = names()
        .produce()
        .filter_items(|name| name.len() < 3)
        .drain_to_list()
        .await?;

    assert_eq!(result, vec!["AJ", "Jm"]);
    Ok(())
}

#[tokio::test]
async fn test_filter_items_is_order_preserving_subsequence() -> anyhow::Result<()> {
    // Arrange
    let seed: Vec<u32> = (0..200).map(|_| fastrand::u32(0..1000)).collect();
    let expected: Vec<u32> = seed.iter().copied().filter(|n| n % 3 == 0).collect();

    // Act
    let result = Sequence::new(seed)
        .produce()
        .filter_items(|n| n % 3 == 0)
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(result, expected);

    Ok(())
}

#[tokio::test]
async fn test_filter_items_can_filter_everything() -> anyhow::Result<()> {
    let result = names()
        .produce()
        .filter_items(|name| name.len() > 10)
        .drain_to_list()
        .await?;

    assert!(result.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_filter_items_forwards_error_even_for_rejecting_predicate() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<String>();
    let mut stream = Box::pin(stream.filter_items(|_| false));

    // Act
    tx.send(StreamItem::Value("AJ".to_string()))?;
    tx.send(StreamItem::Error(SeqfluxError::stream_error("boom")))?;
    tx.send(StreamItem::Value("Jm".to_string()))?;
    drop(tx);

    // Assert
    assert!(unwrap_stream(&mut stream, 500).await.is_err());
    assert!(stream.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_filter_then_map() -> anyhow::Result<()> {
    let result = names()
        .produce()
        .filter_items(|name| name.len() > 3)
        .map_items(|name| name.to_uppercase())
        .drain_to_list()
        .await?;

    assert_eq!(result, vec!["CHARLES", "ERICK", "JEROME"]);
    Ok(())
}
