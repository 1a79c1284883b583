//! Shift API variant: one candidate per (location, payload) pair.

use shiftscan_core::{state_from_postcode, Location, ShiftCandidate};

use crate::payload::{RawShiftPayload, Section};

/// A named place to look for a field value.
struct Strategy {
    name: &'static str,
    section: Section,
    key: &'static str,
}

const fn strategy(name: &'static str, section: Section, key: &'static str) -> Strategy {
    Strategy { name, section, key }
}

const DAY: &[Strategy] = &[
    strategy("nice day of week", Section::Nice, "start_timestamp__dayofweek"),
    strategy("recurring days", Section::Attributes, "custom_what_days_it_occurs"),
    strategy("plain day", Section::Attributes, "day"),
];

const START_TIME: &[Strategy] = &[
    strategy("nice start time", Section::Nice, "start_timestamp__time"),
    strategy("custom start time", Section::Attributes, "custom_start_time"),
    strategy("plain start time", Section::Attributes, "start_time"),
];

const END_TIME: &[Strategy] = &[
    strategy("nice end time", Section::Nice, "end_timestamp__time"),
    strategy("custom end time", Section::Attributes, "custom_end_time"),
    strategy("plain end time", Section::Attributes, "end_time"),
];

const SHIFT_STATUS: &[Strategy] = &[
    strategy("custom shift status", Section::Attributes, "custom_shift_status"),
    strategy("plain shift status", Section::Attributes, "shift_status"),
];

const VAN_ASSET: &[Strategy] = &[
    strategy("custom van asset", Section::Attributes, "custom_van_asset"),
    strategy("plain van asset", Section::Attributes, "van_asset"),
];

/// First non-empty value across `strategies`, or `""` when none match.
fn first_match(payload: &RawShiftPayload, field: &str, strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .find_map(|s| {
            let value = payload.field(s.section, s.key)?.resolve();
            tracing::trace!(field, strategy = s.name, %value, "field resolved");
            Some(value)
        })
        .unwrap_or_default()
}

/// Builds a candidate shift from a location and one raw shift object.
///
/// Identity, address and coordinates come from the location. Returns `None`
/// when the payload has none of the expected sub-maps.
#[must_use]
pub fn resolve_api_shift(location: &Location, payload: &RawShiftPayload) -> Option<ShiftCandidate> {
    if !payload.has_sections() {
        tracing::debug!(location = %location.name, "dropping shift payload without sub-maps");
        return None;
    }

    let candidate = ShiftCandidate {
        service_name: location.name.clone(),
        suburb: location.city.clone(),
        state: state_from_postcode(location.postcode.as_deref()),
        address: Some(location.display_address().to_owned()),
        lat: location.lat,
        lng: location.lng,
        day: first_match(payload, "day", DAY),
        start_time: first_match(payload, "start_time", START_TIME),
        end_time: first_match(payload, "end_time", END_TIME),
        shift_status: Some(first_match(payload, "shift_status", SHIFT_STATUS)),
        van_asset: Some(first_match(payload, "van_asset", VAN_ASSET)),
    };

    if !candidate.has_schedule() {
        tracing::debug!(
            location = %location.name,
            keys = ?payload.schedule_keys(),
            "shift payload carries no day or time"
        );
    }

    Some(candidate)
}
