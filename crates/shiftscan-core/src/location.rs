/// A physical service site parsed from the upstream location directory.
///
/// Coordinates are optional here because the directory block is not trusted
/// to carry them; a location without coordinates still produces candidate
/// shifts, which the validator then rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Upstream-assigned identifier, when the directory record carries one.
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    pub street: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub postcode: Option<String>,
    /// Shift-source identifiers, in directory order. Never empty.
    pub source_ids: Vec<String>,
}

impl Location {
    /// Street address when present and non-blank, otherwise the city.
    #[must_use]
    pub fn display_address(&self) -> &str {
        self.street
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.city)
    }
}

/// Split a comma-joined source-id string into trimmed, non-empty ids.
#[must_use]
pub fn split_source_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
