//! Shift records before and after validation.
//!
//! Resolvers produce [`ShiftCandidate`]s, which are loose about the fields
//! the upstream sources do not reliably carry (address, coordinates). The
//! validator turns survivors of the completeness filter into canonical
//! [`Shift`]s collected in a [`ShiftSet`].

use serde::{Serialize, Serializer};

use crate::tabular::{encode_csv, Cell, TabularRecord};
use crate::EncodeError;

/// Australian state or territory inferred for a shift's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuState {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl AuState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AuState::Nsw => "NSW",
            AuState::Vic => "VIC",
            AuState::Qld => "QLD",
            AuState::Sa => "SA",
            AuState::Wa => "WA",
            AuState::Tas => "TAS",
            AuState::Nt => "NT",
            AuState::Act => "ACT",
            AuState::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for AuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shift as assembled by a field resolver, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftCandidate {
    pub service_name: String,
    pub suburb: String,
    pub state: AuState,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub shift_status: Option<String>,
    pub van_asset: Option<String>,
}

impl ShiftCandidate {
    /// Whether the record names a service and suburb and carries at least
    /// some schedule information.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.service_name.is_empty()
            && !self.suburb.is_empty()
            && self.has_schedule()
    }

    /// Whether any of day, start time or end time is present.
    #[must_use]
    pub fn has_schedule(&self) -> bool {
        !self.day.is_empty() || !self.start_time.is_empty() || !self.end_time.is_empty()
    }
}

/// A canonical, validated shift. This is the unit written to both artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shift {
    pub service_name: String,
    pub suburb: String,
    pub state: AuState,
    pub address: String,
    #[serde(serialize_with = "serialize_coordinate")]
    pub lat: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub lng: f64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub van_asset: Option<String>,
}

impl TabularRecord for Shift {
    fn columns(&self) -> Vec<(&'static str, Cell)> {
        let mut columns = vec![
            ("service_name", Cell::text(&self.service_name)),
            ("suburb", Cell::text(&self.suburb)),
            ("state", Cell::text(self.state.as_str())),
            ("address", Cell::text(&self.address)),
            ("lat", Cell::Number(self.lat)),
            ("lng", Cell::Number(self.lng)),
            ("day", Cell::text(&self.day)),
            ("start_time", Cell::text(&self.start_time)),
            ("end_time", Cell::text(&self.end_time)),
        ];
        // Mirrors the JSON shape: absent optionals are absent columns.
        if let Some(status) = &self.shift_status {
            columns.push(("shift_status", Cell::text(status)));
        }
        if let Some(van) = &self.van_asset {
            columns.push(("van_asset", Cell::text(van)));
        }
        columns
    }
}

/// Whole-valued coordinates are written as JSON integers (`0`, `147`), the
/// way the CSV side renders them; everything else as a float.
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation)]
fn serialize_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// The ordered output of a run: every record passed the completeness filter
/// and shape validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftSet(Vec<Shift>);

impl ShiftSet {
    pub(crate) fn new(shifts: Vec<Shift>) -> Self {
        Self(shifts)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Shift] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shift> {
        self.0.iter()
    }

    /// Pretty-printed JSON array with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    /// Row/column text rendering; empty string for an empty set.
    #[must_use]
    pub fn to_csv(&self) -> String {
        encode_csv(&self.0)
    }
}

impl<'a> IntoIterator for &'a ShiftSet {
    type Item = &'a Shift;
    type IntoIter = std::slice::Iter<'a, Shift>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
