// ── Bounded-concurrency batch fetcher ──
//
// Resolves a list of identifiers against a per-identifier async operation
// with a fixed concurrency ceiling. Completion order is nondeterministic;
// output order is not: every unit of work is tagged with its input index
// before dispatch and results are re-sorted at collection time.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future;
use tracing::warn;

/// Default ceiling on concurrent in-flight fetches.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Resolve `ids` through `fetch_one`, at most `concurrency` in flight.
///
/// Contract:
/// - Output preserves the relative order of the identifiers that produced
///   each record; an identifier yielding several records keeps them
///   contiguous at that identifier's position.
/// - Duplicated identifiers are each fetched independently.
/// - A failed `fetch_one` contributes zero records and is logged; the
///   batch always completes with whatever succeeded. No retries.
///
/// `min(concurrency, ids.len())` workers (never fewer than one) share an
/// atomic cursor over the identifier sequence; each worker claims the next
/// unclaimed index until exhaustion.
pub async fn fetch_ordered<K, R, E, F, Fut>(ids: &[K], concurrency: usize, fetch_one: F) -> Vec<R>
where
    K: Clone + fmt::Display,
    E: fmt::Display,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
{
    if ids.is_empty() {
        return Vec::new();
    }

    let workers = concurrency.clamp(1, ids.len());
    let cursor = AtomicUsize::new(0);

    let worker_results = future::join_all((0..workers).map(|_| async {
        let mut claimed: Vec<(usize, Vec<R>)> = Vec::new();
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            let Some(id) = ids.get(index) else {
                break;
            };
            match fetch_one(id.clone()).await {
                Ok(records) => claimed.push((index, records)),
                Err(e) => warn!(id = %id, error = %e, "identifier fetch failed; skipping"),
            }
        }
        claimed
    }))
    .await;

    let mut tagged: Vec<(usize, Vec<R>)> = worker_results.into_iter().flatten().collect();
    tagged.sort_by_key(|(index, _)| *index);
    tagged.into_iter().flat_map(|(_, records)| records).collect()
}
