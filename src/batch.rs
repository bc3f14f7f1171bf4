//! Bounded fan-out in fixed-size batches.
//!
//! All futures of a batch are polled together and awaited as a unit before
//! the next batch starts, with a pause in between. This is the only
//! backpressure in the crawl: batch size caps in-flight requests and the
//! pause throttles the overall request rate.

use crate::config::BatchPolicy;
use futures::future::join_all;
use std::future::Future;
use tracing::info;

/// Runs `task` over `items`, `policy.size` at a time. Results come back in
/// the order of `items`, whatever order the requests completed in.
pub async fn run_batched<I, T, F, Fut>(
    phase: &str,
    items: Vec<I>,
    policy: BatchPolicy,
    mut task: F,
) -> Vec<T>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = T>,
{
    let total = items.len();
    let size = policy.size.max(1);
    let mut results = Vec::with_capacity(total);
    let mut remaining = items.into_iter().peekable();
    let mut start = 0;

    while remaining.peek().is_some() {
        let batch: Vec<Fut> = remaining.by_ref().take(size).map(&mut task).collect();
        let end = start + batch.len();
        info!("Processing {} {} to {} of {}...", phase, start, end, total);

        results.extend(join_all(batch).await);
        start = end;

        if remaining.peek().is_some() && !policy.pause().is_zero() {
            tokio::time::sleep(policy.pause()).await;
        }
    }

    results
}
