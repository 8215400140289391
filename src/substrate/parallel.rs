/* -------------------------------------------------------------------------- *\
 *                   Kurtosis — Enclave Lifecycle Backend                     *
 * -------------------------------------------------------------------------- *
 * Copyright 2023 - 2026, the kurtosis contributors                           *
 * SPDX-License-Identifier: Apache-2.0                                        *
\* -------------------------------------------------------------------------- */

use super::{Result, SubstrateError};
use futures::stream::{self, StreamExt};
use iter_tools::{Either, Itertools};
use std::collections::{HashMap, HashSet};
use std::future::Future;

/// Cap on concurrent substrate calls issued by one batch verb, so a large
/// batch cannot exhaust the engine socket.
pub const MAX_CONCURRENT_SUBSTRATE_OPS: usize = 25;

/// Runs `op` over every object id with at most `max_in_flight` calls in
/// flight, and splits the ids by outcome.
///
/// Each id is moved into its own future before anything is polled, so the
/// operation always sees the id it was built for. One object's failure never
/// stops the others; the caller decides how to aggregate the error map.
pub async fn run_in_parallel<F, Fut>(
    object_ids: HashSet<String>,
    max_in_flight: usize,
    op: F,
) -> (HashSet<String>, HashMap<String, SubstrateError>)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let outcomes: Vec<(String, Result<()>)> =
        stream::iter(object_ids.into_iter().map(|object_id| {
            let operation = op(object_id.clone());
            async move { (object_id, operation.await) }
        }))
        .buffer_unordered(max_in_flight.max(1))
        .collect()
        .await;

    outcomes.into_iter().partition_map(|(object_id, outcome)| {
        match outcome {
            Ok(()) => Either::Left(object_id),
            Err(e) => Either::Right((object_id, e)),
        }
    })
}
