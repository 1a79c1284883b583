use serde_json::Value;
use shiftscan_core::location::split_source_ids;
use shiftscan_core::Location;

use super::literal::Record;

/// Maps one directory record to a [`Location`].
///
/// Returns `None` for records without a usable `post_id`, since a location
/// with no shift source cannot contribute anything.
pub(super) fn record_to_location(record: &Record) -> Option<Location> {
    let name = text(record.get("name")).unwrap_or_default();

    let source_ids = text(record.get("post_id"))
        .map(|raw| split_source_ids(&raw))
        .unwrap_or_default();
    if source_ids.is_empty() {
        tracing::warn!(location = %name, "no post_id for location, skipping");
        return None;
    }

    Some(Location {
        id: text(record.get("id")),
        city: text(record.get("city")).unwrap_or_default(),
        street: text(record.get("street")),
        lat: coordinate(record.get("lat")),
        lng: coordinate(record.get("lng")),
        postcode: text(record.get("postcode")),
        name,
        source_ids,
    })
}

/// Strings as-is, numbers in their decimal form; anything else is absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coordinate(value: Option<&Value>) -> Option<f64> {
    value.and_then(|v| {
        v.as_f64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
    })
}
