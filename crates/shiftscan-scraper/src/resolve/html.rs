//! List-page variant: every shift on one location's HTML page.

use std::sync::LazyLock;

use regex::Regex;
use shiftscan_core::{state_from_address, suburb_from_address, ShiftCandidate};

use super::clock::to_24_hour;

static LOCATION_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="location-name"[^>]*>([^<]+)</div>"#).expect("valid regex")
});

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<a\b([^>]*)>([^<]+)</a>").expect("valid regex"));

static ADDRESS_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class="address""#).expect("valid regex"));

static QUERY_COORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href="[^"]*[?&](?:amp;)?query=([^,"&]+),([^"&]+)""#).expect("valid regex")
});

static SHIFT_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="shift-time"[^>]*>([^<]+)</div>"#).expect("valid regex")
});

/// `Wed 25 June, 9:30 am - 11:30 am`
static FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\w{3})\s+\d+\s+\w+,\s*(\d{1,2}:\d{2}\s*(?:am|pm))\s*-\s*(\d{1,2}:\d{2}\s*(?:am|pm))",
    )
    .expect("valid regex")
});

struct PageAddress {
    text: String,
    lat: f64,
    lng: f64,
}

/// Extracts one candidate per well-formed shift-time fragment on the page.
///
/// Pages without an address anchor still yield shifts, with empty address
/// and zero coordinates. An anchor whose coordinates do not parse keeps its
/// address text and gets zero coordinates.
#[must_use]
pub fn resolve_page_shifts(html: &str, slug: &str) -> Vec<ShiftCandidate> {
    let service_name = LOCATION_NAME_RE
        .captures(html)
        .map(|cap| decode_html(&cap[1]))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| slug.replace('_', " "));

    let address = extract_address(html, slug).unwrap_or(PageAddress {
        text: String::new(),
        lat: 0.0,
        lng: 0.0,
    });
    let suburb = suburb_from_address(&address.text);
    let state = state_from_address(&address.text);

    SHIFT_TIME_RE
        .captures_iter(html)
        .filter_map(|cap| {
            let fragment = decode_html(&cap[1]);
            let Some(parts) = FRAGMENT_RE.captures(&fragment) else {
                tracing::debug!(slug, %fragment, "unrecognised shift-time fragment");
                return None;
            };
            let (Some(start_time), Some(end_time)) = (to_24_hour(&parts[2]), to_24_hour(&parts[3]))
            else {
                tracing::debug!(slug, %fragment, "shift-time fragment has an invalid clock time");
                return None;
            };

            Some(ShiftCandidate {
                service_name: service_name.clone(),
                suburb: suburb.clone(),
                state,
                address: Some(address.text.clone()),
                lat: Some(address.lat),
                lng: Some(address.lng),
                day: parts[1].to_owned(),
                start_time,
                end_time,
                shift_status: None,
                van_asset: None,
            })
        })
        .collect()
}

fn extract_address(html: &str, slug: &str) -> Option<PageAddress> {
    ANCHOR_RE.captures_iter(html).find_map(|cap| {
        let attrs = &cap[1];
        if !ADDRESS_CLASS_RE.is_match(attrs) {
            return None;
        }
        let text = decode_html(&cap[2]);
        let coords = QUERY_COORDS_RE.captures(attrs).and_then(|c| {
            let lat = c[1].trim().parse::<f64>().ok()?;
            let lng = c[2].trim().parse::<f64>().ok()?;
            Some((lat, lng))
        });
        let (lat, lng) = coords.unwrap_or_else(|| {
            tracing::debug!(slug, address = %text, "address link has no usable coordinates");
            (0.0, 0.0)
        });
        Some(PageAddress { text, lat, lng })
    })
}

fn decode_html(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use shiftscan_core::AuState;

    use super::*;

    const ANCHOR: &str = r#"<a href="https://www.google.com/maps/search/?api=1&query=-42.88,147.33" class="address">2 Swan Street,North Hobart,7000</a>"#;

    fn page(body: &str) -> String {
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn resolves_reference_page() {
        let html = page(&format!(
            r#"<div class="location-name">North Hobart Uniting Church</div>{ANCHOR}
               <div class="shift-time">Wed 25 June, 9:30 am - 11:30 am</div>"#
        ));
        let shifts = resolve_page_shifts(&html, "north_hobart_uniting_church");

        assert_eq!(shifts.len(), 1);
        let shift = &shifts[0];
        assert_eq!(shift.service_name, "North Hobart Uniting Church");
        assert_eq!(shift.day, "Wed");
        assert_eq!(shift.start_time, "09:30");
        assert_eq!(shift.end_time, "11:30");
        assert_eq!(shift.state, AuState::Tas);
        assert_eq!(shift.suburb, "North Hobart");
        assert_eq!(shift.address.as_deref(), Some("2 Swan Street,North Hobart,7000"));
        assert_eq!(shift.lat, Some(-42.88));
        assert_eq!(shift.lng, Some(147.33));
        assert_eq!(shift.shift_status, None);
        assert_eq!(shift.van_asset, None);
    }

    #[test]
    fn one_shift_per_fragment_in_page_order() {
        let html = page(&format!(
            r#"{ANCHOR}
               <div class="shift-time" data-id="1">Mon 23 June, 6:00 pm - 8:00 pm</div>
               <div class="shift-time">not a time</div>
               <div class="shift-time">Sat 28 June, 12:00 pm - 1:30 pm</div>"#
        ));
        let shifts = resolve_page_shifts(&html, "hobart_hall");
        let summary: Vec<_> = shifts
            .iter()
            .map(|s| (s.day.as_str(), s.start_time.as_str(), s.end_time.as_str()))
            .collect();
        assert_eq!(summary, vec![("Mon", "18:00", "20:00"), ("Sat", "12:00", "13:30")]);
    }

    #[test]
    fn name_falls_back_to_slug() {
        let html = page(&format!(
            r#"{ANCHOR}<div class="shift-time">Wed 25 June, 9:30 am - 11:30 am</div>"#
        ));
        let shifts = resolve_page_shifts(&html, "north_hobart_uniting_church");
        assert_eq!(shifts[0].service_name, "north hobart uniting church");
    }

    #[test]
    fn missing_anchor_yields_zero_coordinates() {
        let html = page(r#"<div class="shift-time">Wed 25 June, 9:30 am - 11:30 am</div>"#);
        let shifts = resolve_page_shifts(&html, "perth_cbd");
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].address.as_deref(), Some(""));
        assert_eq!(shifts[0].lat, Some(0.0));
        assert_eq!(shifts[0].lng, Some(0.0));
        assert_eq!(shifts[0].suburb, "Unknown");
        assert_eq!(shifts[0].state, AuState::Unknown);
    }

    #[test]
    fn unparsable_coordinates_keep_address_text() {
        let html = page(
            r#"<a href="https://www.google.com/maps/search/?api=1&query=abc,147.33" class="address">2 Swan Street,North Hobart,7000</a>
               <div class="shift-time">Wed 25 June, 9:30 am - 11:30 am</div>"#,
        );
        let shifts = resolve_page_shifts(&html, "north_hobart_hall");
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].address.as_deref(), Some("2 Swan Street,North Hobart,7000"));
        assert_eq!(shifts[0].suburb, "North Hobart");
        assert_eq!(shifts[0].state, AuState::Tas);
        assert_eq!(shifts[0].lat, Some(0.0));
        assert_eq!(shifts[0].lng, Some(0.0));
    }

    #[test]
    fn entities_are_decoded() {
        let html = page(
            r#"<div class="location-name">St John&#39;s &amp; Co</div>
               <a class="address" href="https://www.google.com/maps/search/?api=1&amp;query=-33.87,151.21">1 Kent St,Sydney &amp; Surrounds,2000</a>
               <div class="shift-time">Thu 26 June, 7:00 am - 9:00 am</div>"#,
        );
        let shifts = resolve_page_shifts(&html, "sydney_cbd");
        assert_eq!(shifts[0].service_name, "St John's & Co");
        assert_eq!(shifts[0].suburb, "Sydney & Surrounds");
        assert_eq!(shifts[0].state, AuState::Nsw);
        assert_eq!(shifts[0].lat, Some(-33.87));
    }

    #[test]
    fn page_without_fragments_yields_nothing() {
        let html = page(&format!(r#"<div class="location-name">Hall</div>{ANCHOR}"#));
        assert!(resolve_page_shifts(&html, "hall").is_empty());
    }
}
