//! Brute-force slug discovery for the HTML fallback.

use std::time::Duration;

use shiftscan_core::{ProbeConfig, ShiftCandidate};

use crate::client::ShiftSourceClient;
use crate::resolve::resolve_page_shifts;

/// Bounds on the generated part of a probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeLimits {
    /// Cap on generated slug probes. Known slugs are not counted.
    pub max_attempts: usize,
    /// Wait after each generated probe.
    pub delay: Duration,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            max_attempts: 500,
            delay: Duration::from_millis(50),
        }
    }
}

/// Result of a probe run.
#[derive(Debug, Default)]
pub struct ProbeOutcome {
    /// Shifts from every discovered page, in probe order.
    pub shifts: Vec<ShiftCandidate>,
    /// Slugs whose page yielded at least one shift, in discovery order.
    pub discovered: Vec<String>,
    /// Requests issued, known and generated.
    pub attempts: usize,
}

impl ProbeOutcome {
    async fn probe(&mut self, client: &ShiftSourceClient, slug: &str) {
        self.attempts += 1;
        let html = match client.fetch_list_page(slug).await {
            Ok(Some(html)) => html,
            Ok(None) => {
                tracing::debug!(slug, "no such location");
                return;
            }
            Err(e) => {
                tracing::debug!(slug, error = %e, "probe failed");
                return;
            }
        };

        let shifts = resolve_page_shifts(&html, slug);
        if shifts.is_empty() || self.discovered.iter().any(|d| d == slug) {
            return;
        }
        tracing::info!(slug, shifts = shifts.len(), "discovered location");
        self.discovered.push(slug.to_owned());
        self.shifts.extend(shifts);
    }
}

/// Probes the known slugs, then generated `city_descriptor` slugs up to
/// `limits.max_attempts`.
///
/// Fetch failures and missing pages count as attempts that found nothing.
pub async fn probe_locations(
    client: &ShiftSourceClient,
    candidates: &ProbeConfig,
    limits: &ProbeLimits,
) -> ProbeOutcome {
    let mut outcome = ProbeOutcome::default();

    tracing::info!(count = candidates.known_slugs.len(), "probing known locations");
    for slug in &candidates.known_slugs {
        outcome.probe(client, slug).await;
    }

    let generated = candidates.generated_slugs();
    let planned = generated.len().min(limits.max_attempts);
    tracing::info!(planned, "probing generated location slugs");
    for slug in generated.iter().take(limits.max_attempts) {
        outcome.probe(client, slug).await;
        if !limits.delay.is_zero() {
            tokio::time::sleep(limits.delay).await;
        }
    }

    tracing::info!(
        attempts = outcome.attempts,
        discovered = outcome.discovered.len(),
        shifts = outcome.shifts.len(),
        "probe complete"
    );
    outcome
}
