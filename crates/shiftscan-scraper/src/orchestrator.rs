//! Sequential, paced fetching of raw shift payloads for every location.

use std::time::Duration;

use shiftscan_core::Location;

use crate::client::ShiftSourceClient;
use crate::payload::RawShiftPayload;

/// Request pacing for the shift API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Locations per progress group. Groups do not run in parallel.
    pub batch_size: usize,
    /// Wait after every per-id request, successful or not.
    pub request_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            batch_size: 3,
            request_delay: Duration::from_millis(100),
        }
    }
}

/// Everything gathered by [`fetch_location_payloads`].
#[derive(Debug)]
pub struct FetchOutcome<'a> {
    /// One entry per shift object returned upstream, in fetch order.
    pub payloads: Vec<(&'a Location, RawShiftPayload)>,
    pub locations_processed: usize,
    /// Source ids whose request failed and contributed nothing.
    pub failed_ids: Vec<String>,
}

/// Fetches the shift objects for every source id of every location.
///
/// Requests run strictly one at a time in location order, then source-id
/// order, with `pacing.request_delay` after each. A failing id is logged and
/// recorded in [`FetchOutcome::failed_ids`]; the run carries on.
pub async fn fetch_location_payloads<'a>(
    client: &ShiftSourceClient,
    locations: &'a [Location],
    pacing: &Pacing,
) -> FetchOutcome<'a> {
    let mut outcome = FetchOutcome {
        payloads: Vec::new(),
        locations_processed: 0,
        failed_ids: Vec::new(),
    };
    let total = locations.len();

    for batch in locations.chunks(pacing.batch_size.max(1)) {
        for location in batch {
            for source_id in &location.source_ids {
                match client.fetch_shift_payloads(source_id).await {
                    Ok(items) => {
                        tracing::debug!(
                            location = %location.name,
                            %source_id,
                            shifts = items.len(),
                            "fetched shifts"
                        );
                        outcome.payloads.extend(
                            items
                                .into_iter()
                                .map(|item| (location, RawShiftPayload::from(item))),
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            location = %location.name,
                            %source_id,
                            error = %e,
                            "shift fetch failed, skipping source id"
                        );
                        outcome.failed_ids.push(source_id.clone());
                    }
                }

                if !pacing.request_delay.is_zero() {
                    tokio::time::sleep(pacing.request_delay).await;
                }
            }
            outcome.locations_processed += 1;
        }

        tracing::info!(
            processed = outcome.locations_processed,
            total,
            "processed {}/{} locations",
            outcome.locations_processed,
            total
        );
    }

    outcome
}
