/*!
 * Ordered, fail-fast scheduling of per-caption translation work.
 */

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};
use log::debug;

use super::TranslationMode;

/// Run `task` once for every item and collect the results in input order.
///
/// Sequential mode awaits each task before starting the next. Concurrent mode
/// keeps up to `max_in_flight` tasks running but still yields results in
/// input order. Either way the first error is returned, no further task is
/// started, and the successful results gathered so far are dropped.
pub async fn translate_in_order<T, R, E, F, Fut>(
    items: Vec<T>,
    mode: TranslationMode,
    task: F,
) -> Result<Vec<R>, E>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    match mode {
        TranslationMode::Sequential => {
            let mut results = Vec::with_capacity(items.len());
            for item in items {
                results.push(task(item).await?);
            }
            Ok(results)
        }
        TranslationMode::Concurrent { max_in_flight } => {
            debug!(
                "Translating {} captions with up to {} requests in flight",
                items.len(),
                max_in_flight
            );
            stream::iter(items)
                .map(task)
                .buffered(max_in_flight.max(1))
                .try_collect()
                .await
        }
    }
}
