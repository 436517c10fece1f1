// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use seqflux_core::{Item, SeqfluxError, Sequence};
use seqflux_exec::{DrainExt, InlineScheduler, ParallelScheduler};
use seqflux_stream::{FlatExpandOptions, Pipeline, Stage};
use seqflux_test_utils::names::{char_sequence, names, upper_names, NO_NAME_LONGER_THAN_TEN};
use seqflux_test_utils::{assert_same_multiset, random_delay};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[tokio::test]
async fn test_pipeline_without_stages_reproduces_seed() -> anyhow::Result<()> {
    let pipeline = Pipeline::<Item>::inline();

    let result = pipeline.run(&names()).drain_to_list().await?;

    assert_eq!(result, names().values());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pipeline_rerun_is_identical_for_deterministic_stages() -> anyhow::Result<()> {
    // Arrange
    let source = names();
    let pipeline = Pipeline::parallel()
        .map(|name: Item| name.to_lowercase())
        .filter(|name| name.len() > 2)
        .flat_expand_ordered(|name| {
            thread::sleep(random_delay(15));
            Ok(char_sequence(&name))
        });

    // Act
    let first = pipeline.run(&source).drain_to_list().await?;
    let second = pipeline.run(&source).drain_to_list().await?;

    // Assert
    assert_eq!(first, second);
    assert_eq!(first.concat(), "charleserickjerome");

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pipeline_unordered_stage_keeps_multiset() -> anyhow::Result<()> {
    // Arrange
    let pipeline = Pipeline::new(Arc::new(ParallelScheduler::new()))
        .flat_expand_unordered(|name: Item| {
            thread::sleep(random_delay(20));
            Ok(Sequence::new(vec![name.to_uppercase()]).produce_boxed())
        })
        .map(|name| name.to_uppercase());

    // Act
    let result = pipeline.run(&names()).drain_to_list().await?;

    // Assert
    assert_eq!(result.len(), 5);
    assert_same_multiset(&result, &upper_names());

    Ok(())
}

#[tokio::test]
async fn test_pipeline_switch_if_empty() -> anyhow::Result<()> {
    let pipeline = Pipeline::inline()
        .filter(|name: &Item| name.len() > 10)
        .switch_if_empty(Sequence::from(&[NO_NAME_LONGER_THAN_TEN][..]));

    let result = pipeline.run(&names()).drain_to_list().await?;

    assert_eq!(result, vec![NO_NAME_LONGER_THAN_TEN]);
    Ok(())
}

#[tokio::test]
async fn test_pipeline_into_transform_reuses_sub_pipeline() -> anyhow::Result<()> {
    // Arrange
    let shout_long_names = Pipeline::inline()
        .map(|name: Item| name.to_uppercase())
        .filter(|name| name.len() > 3)
        .into_transform();

    let pipeline = Pipeline::inline()
        .stage(Stage::Transform(shout_long_names.clone()))
        .default_if_empty("nobody".to_string());

    // Act
    let on_names = pipeline.run(&names()).drain_to_list().await?;
    let on_short = pipeline
        .run(&Sequence::from(&["AJ", "Jm"][..]))
        .drain_to_list()
        .await?;

    // Assert
    assert_eq!(on_names, vec!["CHARLES", "ERICK", "JEROME"]);
    assert_eq!(on_short, vec!["nobody"]);

    Ok(())
}

#[tokio::test]
async fn test_pipeline_try_map_failure_is_terminal() -> anyhow::Result<()> {
    let pipeline = Pipeline::inline()
        .try_map(|name: Item| {
            if name.starts_with('E') {
                Err(SeqfluxError::stream_error(format!("rejected {name}")))
            } else {
                Ok(name)
            }
        })
        .log("after-try-map");

    let (values, error) = pipeline.run(&names()).drain_items().await;

    assert_eq!(values, vec!["AJ", "Charles"]);
    assert!(error.is_some_and(|e| e.to_string().contains("rejected Erick")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pipeline_single_in_flight_unordered_is_ordered() -> anyhow::Result<()> {
    let pipeline = Pipeline::parallel().flat_expand_unordered_with(
        FlatExpandOptions::with_max_in_flight(NonZeroUsize::MIN),
        |name: Item| {
            thread::sleep(random_delay(10));
            Ok(char_sequence(&name))
        },
    );

    let result = pipeline.run(&names()).drain_to_list().await?;

    assert_eq!(result.concat(), "AJCharlesErickJeromeJm");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_delay_elements_stage() -> anyhow::Result<()> {
    let pipeline = Pipeline::inline()
        .filter(|name: &Item| name.len() < 3)
        .delay_elements(Duration::from_millis(500));
    let start = tokio::time::Instant::now();

    let result = pipeline.run(&names()).drain_to_list().await?;

    assert_eq!(result, vec!["AJ", "Jm"]);
    assert!(start.elapsed() >= Duration::from_millis(1000));
    Ok(())
}

#[test]
fn test_pipeline_debug_lists_stages() {
    let pipeline = Pipeline::new(Arc::new(InlineScheduler))
        .map(|name: Item| name)
        .default_if_empty("fallback".to_string())
        .log("debug");

    let rendered = format!("{pipeline:?}");

    assert!(rendered.contains("Map"));
    assert!(rendered.contains("DefaultIfEmpty(\"fallback\")"));
    assert!(rendered.contains("Log(\"debug\")"));
    assert!(rendered.contains("inline"));
    let kinds: Vec<_> = pipeline.stages().iter().map(Stage::kind).collect();
    assert_eq!(kinds, vec!["map", "default_if_empty", "log"]);
    assert_eq!(pipeline.scheduler().name(), "inline");
}

#[test]
fn test_pipeline_build_is_lazy() {
    let pipeline = Pipeline::inline().map(|_: Item| -> Item { panic!("must not run") });

    // Building the stream never calls the stage functions
    let _stream = pipeline.run(&names());
}

#[test]
fn test_stage_kinds_name_every_stage() {
    // Arrange
    let pipeline = Pipeline::inline()
        .try_map(|name: Item| Ok(name))
        .filter(|name| !name.is_empty())
        .flat_expand_ordered(|name| Ok(char_sequence(&name)))
        .flat_expand_unordered(|name| Ok(char_sequence(&name)))
        .switch_if_empty(Sequence::from(&[NO_NAME_LONGER_THAN_TEN][..]))
        .transform(|stream| stream)
        .delay_elements(Duration::from_millis(1));

    // Act
    let kinds: Vec<_> = pipeline.stages().iter().map(Stage::kind).collect();

    // Assert
    assert_eq!(
        kinds,
        vec![
            "try_map",
            "filter",
            "flat_expand_ordered",
            "flat_expand_unordered",
            "switch_if_empty",
            "transform",
            "delay_elements",
        ]
    );
}
