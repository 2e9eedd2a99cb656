//! Concurrent Connect-status fetching.
//!
//! Per-supplier status fetches are independent, so they are issued together
//! and their completions arrive in arbitrary order. Results are merged into
//! a map keyed by supplier ID, never by arrival order.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use super::api::SupplierApi;
use super::models::ConnectStatus;
use crate::error::Result;

/// Maximum in-flight status requests
const MAX_CONCURRENT: usize = 8;

type StatusFuture<'a> = Pin<Box<dyn Future<Output = (String, Result<ConnectStatus>)> + Send + 'a>>;

/// Fetch Connect status for every supplier ID concurrently.
///
/// The returned map has exactly one entry per distinct input ID, whatever
/// the completion interleaving. The first error aborts the whole fetch.
pub async fn connect_status_map<C>(
    client: &C,
    supplier_ids: &[String],
) -> Result<HashMap<String, ConnectStatus>>
where
    C: SupplierApi + ?Sized,
{
    let mut statuses = HashMap::with_capacity(supplier_ids.len());
    let mut futures: FuturesUnordered<StatusFuture<'_>> = FuturesUnordered::new();
    let mut pending = supplier_ids.iter();

    let make_future = |id: &String| -> StatusFuture<'_> {
        let id = id.clone();
        Box::pin(async move {
            let result = client.connect_status(&id).await;
            (id, result)
        })
    };

    for id in pending.by_ref().take(MAX_CONCURRENT) {
        futures.push(make_future(id));
    }

    while let Some((id, result)) = futures.next().await {
        let status = result?;
        debug!("Connect status for {}: {}", id, status);
        statuses.insert(id, status);

        if let Some(next) = pending.next() {
            futures.push(make_future(next));
        }
    }

    Ok(statuses)
}
