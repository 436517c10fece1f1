// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use seqflux_core::{SeqfluxError, StreamItem};

#[test]
fn test_only_errors_are_terminal() {
    let value = StreamItem::Value("AJ".to_string());
    let error: StreamItem<String> = StreamItem::Error(SeqfluxError::stream_error("boom"));

    assert!(!value.is_terminal());
    assert!(error.is_terminal());
}

#[test]
fn test_map_transforms_values_only() {
    let value = StreamItem::Value("jm".to_string()).map(|s| s.to_uppercase());
    assert_eq!(value, StreamItem::Value("JM".to_string()));

    let error: StreamItem<String> = StreamItem::Error(SeqfluxError::WorkCancelled);
    assert!(error.map(|s| s.len()).is_terminal());
}

#[test]
fn test_try_map_turns_err_into_terminal_error() {
    let item = StreamItem::Value("Charles".to_string()).try_map(|name| {
        if name.len() > 3 {
            Err(SeqfluxError::stream_error(format!("{name} is too long")))
        } else {
            Ok(name)
        }
    });

    assert_eq!(
        item.into_result().map_err(|e| e.to_string()),
        Err("Stream processing error: Charles is too long".to_string())
    );
}

#[test]
fn test_try_map_keeps_upstream_error() {
    let item: StreamItem<String> = StreamItem::Error(SeqfluxError::WorkCancelled);

    let mapped = item.try_map(|name| Ok(name.len()));

    assert!(matches!(
        mapped.into_result(),
        Err(SeqfluxError::WorkCancelled)
    ));
}

#[test]
fn test_errors_are_never_equal() {
    let a: StreamItem<i32> = StreamItem::Error(SeqfluxError::WorkCancelled);
    let b: StreamItem<i32> = StreamItem::Error(SeqfluxError::WorkCancelled);

    assert_ne!(a, b);
}

#[test]
fn test_result_conversions() -> anyhow::Result<()> {
    let item: StreamItem<i32> = Ok(7).into();
    let back: Result<i32, SeqfluxError> = item.into();
    assert_eq!(back?, 7);

    let failed: StreamItem<i32> = Err(SeqfluxError::stream_error("boom")).into();
    assert!(failed.is_terminal());

    Ok(())
}
