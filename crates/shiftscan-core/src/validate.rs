//! Completeness filtering and canonical-shape validation.
//!
//! Incomplete candidates are dropped silently. A candidate that survives the
//! filter but cannot be turned into a [`Shift`] fails the whole batch: that
//! only happens when the upstream contract has shifted underneath us.

use thiserror::Error;

use crate::shift::{Shift, ShiftCandidate, ShiftSet};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("shift #{index} failed schema validation on `{field}`: {reason} (record: {record})")]
    SchemaValidation {
        /// Position of the record within the filtered sequence.
        index: usize,
        field: &'static str,
        reason: &'static str,
        /// Debug rendering of the offending candidate.
        record: String,
    },
}

/// Keep only candidates with a service name, a suburb, and at least one of
/// day, start time or end time.
#[must_use]
pub fn retain_complete(candidates: Vec<ShiftCandidate>) -> Vec<ShiftCandidate> {
    candidates
        .into_iter()
        .filter(ShiftCandidate::is_complete)
        .collect()
}

/// Filter `candidates` for completeness, then convert every survivor into a
/// canonical [`Shift`].
///
/// # Errors
///
/// Returns [`ValidationError::SchemaValidation`] for the first filtered
/// record with a missing address or a missing or non-finite coordinate.
pub fn validate_shifts(candidates: Vec<ShiftCandidate>) -> Result<ShiftSet, ValidationError> {
    let complete = retain_complete(candidates);
    let shifts = complete
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| into_shift(index, candidate))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ShiftSet::new(shifts))
}

fn into_shift(index: usize, candidate: ShiftCandidate) -> Result<Shift, ValidationError> {
    let fail = |field: &'static str, reason: &'static str, candidate: &ShiftCandidate| {
        ValidationError::SchemaValidation {
            index,
            field,
            reason,
            record: format!("{candidate:?}"),
        }
    };

    let Some(address) = candidate.address.clone() else {
        return Err(fail("address", "required string is missing", &candidate));
    };
    let lat = require_coordinate(candidate.lat).map_err(|reason| fail("lat", reason, &candidate))?;
    let lng = require_coordinate(candidate.lng).map_err(|reason| fail("lng", reason, &candidate))?;

    Ok(Shift {
        service_name: candidate.service_name,
        suburb: candidate.suburb,
        state: candidate.state,
        address,
        lat,
        lng,
        day: candidate.day,
        start_time: candidate.start_time,
        end_time: candidate.end_time,
        shift_status: candidate.shift_status,
        van_asset: candidate.van_asset,
    })
}

fn require_coordinate(value: Option<f64>) -> Result<f64, &'static str> {
    match value {
        None => Err("required number is missing"),
        // NaN and infinities serialize as JSON null.
        Some(v) if !v.is_finite() => Err("number is not finite"),
        Some(v) => Ok(v),
    }
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
