// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use seqflux_core::{Item, SeqfluxError, Sequence, StreamItem};
use seqflux_exec::DrainExt;
use seqflux_stream::{FilterItemsExt, IfEmptyExt, MapItemsExt};
use seqflux_test_utils::names::{names, NO_LONG_NAME, NO_NAME_LONGER_THAN_TEN};
use seqflux_test_utils::{
    assert_no_element_emitted, test_channel, test_channel_with_errors, unwrap_stream,
};

#[tokio::test]
async fn test_default_if_empty_on_filtered_out_names() -> anyhow::Result<()> {
    // Act
    let result = names()
        .produce()
        .filter_items(|name| name.len() > 10)
        .map_items(|name| name.to_uppercase())
        .default_if_empty(NO_LONG_NAME.to_string())
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(result, vec![NO_LONG_NAME]);

    Ok(())
}

#[tokio::test]
async fn test_default_if_empty_on_empty_seed() -> anyhow::Result<()> {
    let result = Sequence::<Item>::empty()
        .produce()
        .default_if_empty("fallback".to_string())
        .drain_to_list()
        .await?;

    assert_eq!(result, vec!["fallback"]);
    Ok(())
}

#[tokio::test]
async fn test_default_if_empty_never_appears_for_non_empty_input() -> anyhow::Result<()> {
    for min_len in 0..7 {
        let result = names()
            .produce()
            .filter_items(move |name| name.len() > min_len)
            .default_if_empty(NO_LONG_NAME.to_string())
            .drain_to_list()
            .await?;

        assert!(!result.is_empty());
        assert!(!result.iter().any(|name| name == NO_LONG_NAME));
    }

    Ok(())
}

#[tokio::test]
async fn test_default_if_empty_decides_only_after_completion() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<Item>();
    let mut stream = Box::pin(stream.default_if_empty("fallback".to_string()));

    // Act & Assert
    assert_no_element_emitted(&mut stream, 50).await;
    drop(tx);
    assert_eq!(unwrap_stream(&mut stream, 500).await?, "fallback");
    assert!(stream.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_default_if_empty_does_not_treat_error_as_empty() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<Item>();
    let mut stream = Box::pin(stream.default_if_empty("fallback".to_string()));

    // Act
    tx.send(StreamItem::Error(SeqfluxError::stream_error("boom")))?;
    drop(tx);

    // Assert
    assert!(unwrap_stream(&mut stream, 500).await.is_err());
    assert!(stream.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_switch_if_empty_drains_fallback() -> anyhow::Result<()> {
    // Arrange
    let fallback = Sequence::from(&[NO_NAME_LONGER_THAN_TEN][..]);

    // Act
    let result = names()
        .produce()
        .filter_items(|name| name.len() > 10)
        .switch_if_empty(fallback)
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(result, vec![NO_NAME_LONGER_THAN_TEN]);

    Ok(())
}

#[tokio::test]
async fn test_switch_if_empty_with_multi_item_fallback() -> anyhow::Result<()> {
    let fallback = Sequence::from(&["Madronero", "Morales"][..]);

    let result = Sequence::<Item>::empty()
        .produce()
        .switch_if_empty(fallback)
        .drain_to_list()
        .await?;

    assert_eq!(result, vec!["Madronero", "Morales"]);
    Ok(())
}

#[tokio::test]
async fn test_switch_if_empty_with_empty_fallback_is_empty() -> anyhow::Result<()> {
    let result = Sequence::<Item>::empty()
        .produce()
        .switch_if_empty(Sequence::empty())
        .drain_to_list()
        .await?;

    assert!(result.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_switch_if_empty_passes_through_non_empty_upstream() -> anyhow::Result<()> {
    let result = names()
        .produce()
        .filter_items(|name| name.len() > 5)
        .switch_if_empty(Sequence::from(&[NO_NAME_LONGER_THAN_TEN][..]))
        .drain_to_list()
        .await?;

    assert_eq!(result, vec!["Charles", "Jerome"]);
    Ok(())
}

#[tokio::test]
async fn test_switch_if_empty_does_not_treat_error_as_empty() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<Item>();

    // Act
    tx.send(StreamItem::Error(SeqfluxError::stream_error("boom")))?;
    drop(tx);
    let (values, error) = stream
        .switch_if_empty(Sequence::from(&["fallback"][..]))
        .drain_items()
        .await;

    // Assert
    assert!(values.is_empty());
    assert!(error.is_some());

    Ok(())
}
