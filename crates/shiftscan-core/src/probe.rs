//! Slug candidates for the HTML fallback path.
//!
//! Without an authoritative location index, the fallback probes a fixed set
//! of known slugs and then every `city_descriptor` combination.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

const DEFAULT_KNOWN_SLUGS: &[&str] = &["north_hobart_uniting_church"];

const DEFAULT_CITIES: &[&str] = &[
    "brisbane",
    "sydney",
    "melbourne",
    "perth",
    "adelaide",
    "hobart",
    "darwin",
    "canberra",
    "gold_coast",
    "sunshine_coast",
    "newcastle",
    "wollongong",
    "geelong",
    "townsville",
    "cairns",
    "north_hobart",
    "south_hobart",
    "west_hobart",
];

const DEFAULT_DESCRIPTORS: &[&str] = &[
    "uniting_church",
    "community_centre",
    "service",
    "cbd",
    "park",
    "shelter",
    "mission",
    "centre",
    "hall",
    "church",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub known_slugs: Vec<String>,
    pub cities: Vec<String>,
    pub descriptors: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let owned =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| (*s).to_owned()).collect() };
        Self {
            known_slugs: owned(DEFAULT_KNOWN_SLUGS),
            cities: owned(DEFAULT_CITIES),
            descriptors: owned(DEFAULT_DESCRIPTORS),
        }
    }
}

impl ProbeConfig {
    /// Generated `city_descriptor` slugs in city-major order, excluding any
    /// slug already listed as known.
    #[must_use]
    pub fn generated_slugs(&self) -> Vec<String> {
        self.cities
            .iter()
            .flat_map(|city| {
                self.descriptors
                    .iter()
                    .map(move |descriptor| format!("{city}_{descriptor}"))
            })
            .filter(|slug| !self.known_slugs.contains(slug))
            .collect()
    }
}

/// Load and validate slug candidates from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_probe_config(path: &Path) -> Result<ProbeConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProbeFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ProbeConfig = serde_yaml::from_str(&content)?;
    validate_probe_config(&config)?;
    Ok(config)
}

fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.cities.is_empty() && config.known_slugs.is_empty() {
        return Err(ConfigError::Validation(
            "at least one known slug or city is required".to_string(),
        ));
    }

    for (list, entries) in [
        ("known_slugs", &config.known_slugs),
        ("cities", &config.cities),
        ("descriptors", &config.descriptors),
    ] {
        let mut seen = HashSet::new();
        for entry in entries {
            if entry.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{list} contains an empty entry"
                )));
            }
            if !entry
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            {
                return Err(ConfigError::Validation(format!(
                    "{list} entry '{entry}' must use only a-z, 0-9 and '_'"
                )));
            }
            if !seen.insert(entry.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate {list} entry: '{entry}'"
                )));
            }
        }
    }

    Ok(())
}
