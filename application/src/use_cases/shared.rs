//! Shared utilities for use cases.
//!
//! Contains the bounded fan-out used by every wave and by agent
//! reconciliation.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, warn};

/// Run one task per job with at most `semaphore`'s permits in flight.
///
/// A task keeps its permit until its result has been collected here, and
/// finished tasks are always collected before a new one is spawned. So once
/// a task fails, nothing else starts: the error is returned and dropping the
/// `JoinSet` aborts the tasks still running. Results come back in job order.
///
/// Each job carries a label (the acting agent's slug); `on_complete` is
/// called with it as every task settles.
pub(crate) async fn run_bounded<I, O, E, F, Fut>(
    semaphore: &Arc<Semaphore>,
    phase: &str,
    jobs: Vec<(String, I)>,
    task: F,
    on_complete: &(dyn Fn(&str, bool) + Sync),
) -> Result<Vec<O>, E>
where
    I: Send + 'static,
    O: Send + 'static,
    E: From<JoinError> + Display + Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
{
    let total = jobs.len();
    let mut join_set: JoinSet<Finished<O, E>> = JoinSet::new();
    let mut results: Vec<(usize, O)> = Vec::with_capacity(total);

    for (index, (label, item)) in jobs.into_iter().enumerate() {
        let acquired = loop {
            tokio::select! {
                biased;
                Some(joined) = join_set.join_next(), if !join_set.is_empty() => {
                    collect::<O, E>(joined, phase, on_complete, &mut results)?;
                }
                acquired = Arc::clone(semaphore).acquire_owned() => break acquired,
            }
        };
        let Ok(permit) = acquired else {
            warn!("{}: limiter closed, {} tasks not started", phase, total - index);
            break;
        };

        debug!("{}: starting task {}/{} for {}", phase, index + 1, total, label);
        let future = task(item);
        join_set.spawn(async move {
            let result = future.await;
            (index, label, result, permit)
        });
    }

    while let Some(joined) = join_set.join_next().await {
        collect::<O, E>(joined, phase, on_complete, &mut results)?;
    }

    results.sort_by_key(|(index, _)| *index);
    Ok(results.into_iter().map(|(_, output)| output).collect())
}

/// A settled task: job index, label, result, and the permit it still holds.
type Finished<O, E> = (usize, String, Result<O, E>, OwnedSemaphorePermit);

fn collect<O, E>(
    joined: Result<Finished<O, E>, JoinError>,
    phase: &str,
    on_complete: &(dyn Fn(&str, bool) + Sync),
    results: &mut Vec<(usize, O)>,
) -> Result<(), E>
where
    E: From<JoinError> + Display,
{
    match joined {
        Ok((index, label, Ok(output), _permit)) => {
            on_complete(&label, true);
            results.push((index, output));
            Ok(())
        }
        Ok((_, label, Err(e), _permit)) => {
            warn!("{}: task for {} failed: {}", phase, label, e);
            on_complete(&label, false);
            Err(e)
        }
        Err(e) => {
            warn!("{}: task join error: {}", phase, e);
            Err(E::from(e))
        }
    }
}
