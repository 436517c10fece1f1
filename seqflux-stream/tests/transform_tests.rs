// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use seqflux_core::{Item, Sequence, StreamItem};
use seqflux_exec::DrainExt;
use seqflux_stream::{FilterItemsExt, IfEmptyExt, MapItemsExt, TransformExt};
use seqflux_test_utils::names::{names, NO_LONG_NAME};

fn long_names_upper(
    names: impl Stream<Item = StreamItem<Item>> + Send + 'static,
) -> impl Stream<Item = StreamItem<Item>> + Send + 'static {
    names
        .map_items(|name| name.to_uppercase())
        .filter_items(|name| name.len() > 3)
}

#[tokio::test]
async fn test_transform_applies_composed_chain() -> anyhow::Result<()> {
    // Act
    let result = names()
        .produce()
        .transform(long_names_upper)
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(result, vec!["CHARLES", "ERICK", "JEROME"]);

    Ok(())
}

#[tokio::test]
async fn test_transform_is_reusable_across_sources() -> anyhow::Result<()> {
    let first = names()
        .produce()
        .transform(long_names_upper)
        .drain_to_list()
        .await?;
    let second = Sequence::from(&["Morales", "Jm"][..])
        .produce()
        .transform(long_names_upper)
        .drain_to_list()
        .await?;

    assert_eq!(first.len(), 3);
    assert_eq!(second, vec!["MORALES"]);
    Ok(())
}

#[tokio::test]
async fn test_transform_followed_by_default_if_empty() -> anyhow::Result<()> {
    let result = names()
        .produce()
        .transform(|names| long_names_upper(names).filter_items(|name| name.len() > 10))
        .default_if_empty(NO_LONG_NAME.to_string())
        .drain_to_list()
        .await?;

    assert_eq!(result, vec![NO_LONG_NAME]);
    Ok(())
}
