//! Artifact writing and console reporting for a validated shift set.

use std::path::{Path, PathBuf};

use anyhow::Context;
use shiftscan_core::ShiftSet;

/// Artifact file stem for the shift API pipeline.
pub(crate) const API_STEM: &str = "orange_sky_shifts_api";
/// Artifact file stem for the HTML fallback pipeline.
pub(crate) const HTML_STEM: &str = "orange_sky_shifts";

#[derive(Debug)]
pub(crate) struct Artifacts {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Writes `{stem}.json` and `{stem}.csv` into `out_dir`, creating it if needed.
///
/// Both documents are rendered before either file is touched.
pub(crate) fn write_artifacts(
    shifts: &ShiftSet,
    out_dir: &Path,
    stem: &str,
) -> anyhow::Result<Artifacts> {
    let json = shifts.to_json_pretty()?;
    let csv = shifts.to_csv();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let artifacts = Artifacts {
        json: out_dir.join(format!("{stem}.json")),
        csv: out_dir.join(format!("{stem}.csv")),
    };
    std::fs::write(&artifacts.json, json)
        .with_context(|| format!("failed to write {}", artifacts.json.display()))?;
    std::fs::write(&artifacts.csv, csv)
        .with_context(|| format!("failed to write {}", artifacts.csv.display()))?;
    Ok(artifacts)
}

/// One-line summaries of the first `n` shifts:
/// `name (suburb, STATE) - day start-end`.
pub(crate) fn sample_lines(shifts: &ShiftSet, n: usize) -> Vec<String> {
    shifts
        .iter()
        .take(n)
        .map(|s| {
            format!(
                "{} ({}, {}) - {} {}-{}",
                s.service_name, s.suburb, s.state, s.day, s.start_time, s.end_time
            )
        })
        .collect()
}
