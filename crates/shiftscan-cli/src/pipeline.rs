//! The two collection pipelines, from upstream fetch to written artifacts.
//!
//! Only directory failures and validation failures escape as errors; every
//! per-request failure has already been absorbed by the scraper.

use std::path::Path;
use std::time::Duration;

use shiftscan_core::{retain_complete, validate_shifts, AppConfig, ProbeConfig, ShiftCandidate};
use shiftscan_scraper::{
    fetch_location_payloads, load_locations, probe_locations, resolve_api_shift, Endpoints,
    Pacing, ProbeLimits, ShiftSourceClient, RAW_CAPTURE_FILE,
};

use crate::output::{self, API_STEM, HTML_STEM};

const SAMPLE_COUNT: usize = 3;

fn build_client(config: &AppConfig) -> anyhow::Result<ShiftSourceClient> {
    let endpoints = Endpoints {
        directory_url: config.directory_url(),
        shift_api_url: config.shift_api_url(),
        list_url: config.list_url(),
    };
    Ok(ShiftSourceClient::new(
        endpoints,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
        config.scraper_max_retries,
        config.scraper_retry_backoff_base_secs,
    )?)
}

/// Directory, then the shift API for every source id of every location.
///
/// # Errors
///
/// Returns an error if the directory cannot be fetched or decoded, if any
/// complete shift fails validation, or if the artifacts cannot be written.
pub(crate) async fn run_api(config: &AppConfig, out_dir: &Path, dry_run: bool) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let pacing = Pacing {
        batch_size: config.scraper_batch_size,
        request_delay: Duration::from_millis(config.scraper_inter_request_delay_ms),
    };

    if dry_run {
        let endpoints = client.endpoints();
        println!(
            "dry-run: would read locations from {} and fetch shifts from {}/{{id}} \
             in batches of {} with {}ms between requests; artifacts to {}",
            endpoints.directory_url,
            endpoints.shift_api_url,
            pacing.batch_size,
            pacing.request_delay.as_millis(),
            out_dir.join(format!("{API_STEM}.{{json,csv}}")).display()
        );
        return Ok(());
    }

    std::fs::create_dir_all(out_dir)?;
    let locations = load_locations(&client, &out_dir.join(RAW_CAPTURE_FILE)).await?;
    println!("Found {} locations", locations.len());

    let fetched = fetch_location_payloads(&client, &locations, &pacing).await;
    let candidates: Vec<ShiftCandidate> = fetched
        .payloads
        .iter()
        .filter_map(|(location, payload)| resolve_api_shift(location, payload))
        .collect();

    println!("Processed {} locations", fetched.locations_processed);
    if !fetched.failed_ids.is_empty() {
        println!(
            "{} source ids could not be fetched: {}",
            fetched.failed_ids.len(),
            fetched.failed_ids.join(", ")
        );
    }
    println!("Found {} total shifts", candidates.len());

    finish(candidates, out_dir, API_STEM)
}

/// Slug probing over the list pages.
///
/// # Errors
///
/// Returns an error if the probe file cannot be loaded, if any complete
/// shift fails validation, or if the artifacts cannot be written.
pub(crate) async fn run_html(
    config: &AppConfig,
    out_dir: &Path,
    probe_config: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let candidates = match probe_config {
        Some(path) => shiftscan_core::load_probe_config(path)?,
        None => ProbeConfig::default(),
    };
    let limits = ProbeLimits {
        max_attempts: config.scraper_max_probe_attempts,
        delay: Duration::from_millis(config.scraper_probe_delay_ms),
    };
    let client = build_client(config)?;

    if dry_run {
        let generated = candidates.generated_slugs().len().min(limits.max_attempts);
        println!(
            "dry-run: would probe {} known and {} generated slugs under {}/{{slug}}; \
             artifacts to {}",
            candidates.known_slugs.len(),
            generated,
            client.endpoints().list_url,
            out_dir.join(format!("{HTML_STEM}.{{json,csv}}")).display()
        );
        return Ok(());
    }

    let outcome = probe_locations(&client, &candidates, &limits).await;

    println!(
        "Probed {} slugs, discovered {} locations",
        outcome.attempts,
        outcome.discovered.len()
    );
    for slug in &outcome.discovered {
        println!("   {slug}");
    }
    println!("Found {} total shifts", outcome.shifts.len());

    finish(outcome.shifts, out_dir, HTML_STEM)
}

/// Completeness filter, validation, artifacts and samples.
fn finish(candidates: Vec<ShiftCandidate>, out_dir: &Path, stem: &str) -> anyhow::Result<()> {
    if candidates.is_empty() {
        tracing::warn!("no shifts found; the upstream structure may have changed");
        return Ok(());
    }

    let total = candidates.len();
    let complete = retain_complete(candidates);
    println!(
        "Found {} complete shifts out of {total} total shifts",
        complete.len()
    );

    let shifts = validate_shifts(complete)?;
    let artifacts = output::write_artifacts(&shifts, out_dir, stem)?;
    println!("Saved {} shifts to {}", shifts.len(), artifacts.json.display());
    println!("Saved {} shifts to {}", shifts.len(), artifacts.csv.display());

    println!("Sample shifts:");
    for line in output::sample_lines(&shifts, SAMPLE_COUNT) {
        println!("   {line}");
    }
    Ok(())
}
