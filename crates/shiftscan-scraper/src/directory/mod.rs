//! Location directory: the inline `var locations = [...]` block on the map
//! page, read as data.

mod literal;
mod record;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use shiftscan_core::Location;

use crate::client::ShiftSourceClient;
use crate::error::DirectoryError;

/// Side file receiving the raw block when it cannot be decoded.
pub const RAW_CAPTURE_FILE: &str = "locations_raw.txt";

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bvar\s+locations\s*=\s*").expect("valid regex"));

/// Parses the location directory out of the map page.
///
/// # Errors
///
/// - [`DirectoryError::Parse`] if the page has no `var locations =` marker.
/// - [`DirectoryError::Decode`] if the text after the marker is not a
///   complete array of flat records.
pub fn parse_directory(html: &str) -> Result<Vec<Location>, DirectoryError> {
    let marker = MARKER_RE.find(html).ok_or(DirectoryError::Parse {
        reason: "no `var locations =` marker",
    })?;
    let rest = &html[marker.end()..];

    let Some(block) = extract_balanced_array(rest) else {
        return Err(DirectoryError::Decode {
            reason: "location block is not a terminated array".to_owned(),
            raw: rest.to_owned(),
        });
    };

    let records = literal::parse_records(block).map_err(|e| DirectoryError::Decode {
        reason: e.to_string(),
        raw: block.to_owned(),
    })?;

    let total = records.len();
    let locations: Vec<Location> = records.iter().filter_map(record::record_to_location).collect();
    tracing::info!(
        locations = locations.len(),
        skipped = total - locations.len(),
        "parsed location directory"
    );
    Ok(locations)
}

/// [`parse_directory`], writing the raw block to `side_file` when it cannot
/// be decoded. The decode error is returned either way.
///
/// # Errors
///
/// Same as [`parse_directory`].
pub fn resolve_directory(html: &str, side_file: &Path) -> Result<Vec<Location>, DirectoryError> {
    parse_directory(html).inspect_err(|err| {
        if let DirectoryError::Decode { raw, .. } = err {
            match std::fs::write(side_file, raw) {
                Ok(()) => tracing::warn!(
                    path = %side_file.display(),
                    "raw location block saved for inspection"
                ),
                Err(e) => tracing::warn!(
                    path = %side_file.display(),
                    error = %e,
                    "failed to save raw location block"
                ),
            }
        }
    })
}

/// Fetches the directory page and resolves it into locations.
///
/// # Errors
///
/// [`DirectoryError::Fetch`] when the page cannot be fetched, otherwise as
/// [`resolve_directory`].
pub async fn load_locations(
    client: &ShiftSourceClient,
    side_file: &Path,
) -> Result<Vec<Location>, DirectoryError> {
    let html = client.fetch_directory_page().await?;
    resolve_directory(&html, side_file)
}

/// Returns the shortest prefix of `s` that forms a complete `[...]` array.
///
/// Brackets inside single- or double-quoted strings and inside comments are
/// ignored. Only `]` at depth 0 ends the scan, so `[42}` is never accepted.
fn extract_balanced_array(s: &str) -> Option<&str> {
    if !s.starts_with('[') {
        return None;
    }
    let bytes = s.as_bytes();
    let mut depth: i32 = 0;
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if let Some(q) = quote {
            match c {
                b'\\' => i += 1,
                _ if c == q => quote = None,
                _ => {}
            }
            i += 1;
            continue;
        }
        match c {
            b'"' | b'\'' => quote = Some(c),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i += s[i..].find('\n').unwrap_or(s.len() - i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += s[i + 2..].find("*/").map_or(s.len() - i, |end| end + 4);
                continue;
            }
            b'[' | b'{' => depth += 1,
            b'}' => depth -= 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<script>
        var map = null;
        var locations = [{"id":"1","name":"Test Hall","city":"Hobart","postcode":"7000","lat":-42.88,"lng":147.33,"post_id":"44343"}];
        initMap(locations);
    </script>"#;

    #[test]
    fn parses_reference_block() {
        let locations = parse_directory(PAGE).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Test Hall");
        assert_eq!(locations[0].source_ids, vec!["44343"]);
        assert_eq!(locations[0].postcode.as_deref(), Some("7000"));
    }

    #[test]
    fn missing_marker_is_parse_error() {
        let err = parse_directory("<html>var places = [];</html>").unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { .. }));
    }

    #[test]
    fn records_without_post_id_are_skipped() {
        let page = "var locations = [{name: 'A', city: 'B'}, {name: 'C', city: 'D', post_id: '7'}];";
        let locations = parse_directory(page).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "C");
    }

    #[test]
    fn brackets_in_strings_and_comments_do_not_end_block() {
        let s = r#"[{a: "]", b: ']'} /* ] */, // ]
            {c: "x\"]"}]; trailing ]"#;
        assert_eq!(extract_balanced_array(s), Some(&s[..s.find(';').unwrap()]));
    }

    #[test]
    fn balanced_scan_rejects_mismatched_close() {
        assert_eq!(extract_balanced_array("[42}"), None);
        assert_eq!(extract_balanced_array("{}"), None);
    }

    #[test]
    fn undecodable_block_is_decode_error_with_raw_text() {
        let page = "var locations = [{name: 'A', tags: ['x']}];";
        match parse_directory(page).unwrap_err() {
            DirectoryError::Decode { raw, .. } => assert_eq!(raw, "[{name: 'A', tags: ['x']}]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unterminated_block_is_decode_error() {
        let err = parse_directory("var locations = [{name: 'A'").unwrap_err();
        assert!(matches!(err, DirectoryError::Decode { .. }));
    }

    #[test]
    fn decode_failure_writes_side_file() {
        let dir = tempfile::tempdir().unwrap();
        let side = dir.path().join(RAW_CAPTURE_FILE);
        let err = resolve_directory("var locations = [{a: eval('x')}];", &side).unwrap_err();

        assert!(matches!(err, DirectoryError::Decode { .. }));
        assert_eq!(std::fs::read_to_string(&side).unwrap(), "[{a: eval('x')}]");
    }

    #[test]
    fn successful_resolve_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let side = dir.path().join(RAW_CAPTURE_FILE);
        resolve_directory(PAGE, &side).unwrap();
        assert!(!side.exists());
    }
}
