// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::SubscriptionOutcome;
use futures::future::{select, Either};
use futures::{pin_mut, Stream, StreamExt};
use seqflux_core::{CancellationToken, SeqfluxError, StreamItem};

pub(super) async fn subscribe_impl<S, T, OnItem, OnComplete, OnFailure>(
    stream: S,
    mut on_item: OnItem,
    on_complete: OnComplete,
    on_failure: OnFailure,
    cancellation_token: Option<CancellationToken>,
) -> SubscriptionOutcome
where
    S: Stream<Item = StreamItem<T>>,
    OnItem: FnMut(T),
    OnComplete: FnOnce(),
    OnFailure: FnOnce(SeqfluxError),
{
    let cancellation_token = cancellation_token.unwrap_or_default();
    let mut items = 0;
    pin_mut!(stream);

    loop {
        let next = {
            let cancelled = cancellation_token.cancelled();
            pin_mut!(cancelled);
            match select(stream.next(), cancelled).await {
                Either::Left((next, _)) => next,
                Either::Right(((), _)) => return SubscriptionOutcome::Cancelled { items },
            }
        };

        match next {
            Some(StreamItem::Value(value)) => {
                items += 1;
                on_item(value);
            }
            Some(StreamItem::Error(error)) => {
                crate::error!("subscription failed after {items} items: {error}");
                on_failure(error);
                return SubscriptionOutcome::Failed { items };
            }
            None => {
                on_complete();
                return SubscriptionOutcome::Completed { items };
            }
        }
    }
}
