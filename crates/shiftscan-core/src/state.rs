//! State inference from postcodes and free-text addresses.
//!
//! Both strategies are total: anything they cannot place maps to
//! [`AuState::Unknown`], which is a valid output rather than an error.

use crate::shift::AuState;

/// Inclusive postcode ranges, checked in order.
const POSTCODE_RANGES: &[(u32, u32, AuState)] = &[
    (1000, 2999, AuState::Nsw),
    (3000, 3999, AuState::Vic),
    (4000, 4999, AuState::Qld),
    (5000, 5999, AuState::Sa),
    (6000, 6999, AuState::Wa),
    (7000, 7999, AuState::Tas),
    (800, 999, AuState::Nt),
    (200, 299, AuState::Act),
];

/// City-name fragments tested against the suburb segment of an address.
/// First match wins, so the order is significant.
const CITY_STATES: &[(&str, AuState)] = &[
    ("Hobart", AuState::Tas),
    ("Brisbane", AuState::Qld),
    ("Sydney", AuState::Nsw),
    ("Newcastle", AuState::Nsw),
    ("Melbourne", AuState::Vic),
    ("Geelong", AuState::Vic),
    ("Perth", AuState::Wa),
    ("Adelaide", AuState::Sa),
    ("Darwin", AuState::Nt),
    ("Canberra", AuState::Act),
];

/// Map a postcode to its state using fixed numeric ranges.
///
/// Leading digits are parsed the way a lenient integer parse would
/// (`"7000"`, `" 7000 "`, `"7000a"` all read as 7000). Absent, empty or
/// non-numeric postcodes map to `Unknown`.
#[must_use]
pub fn state_from_postcode(postcode: Option<&str>) -> AuState {
    let Some(code) = postcode.and_then(leading_integer) else {
        return AuState::Unknown;
    };

    POSTCODE_RANGES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&code))
        .map_or(AuState::Unknown, |(_, _, state)| *state)
}

/// Infer the state from the second comma-delimited segment of an address,
/// e.g. `"2 Swan Street,North Hobart,7000"` -> `TAS`.
#[must_use]
pub fn state_from_address(address: &str) -> AuState {
    let Some(segment) = address.split(',').nth(1).map(str::trim) else {
        return AuState::Unknown;
    };

    CITY_STATES
        .iter()
        .find(|(city, _)| segment.contains(city))
        .map_or(AuState::Unknown, |(_, state)| *state)
}

/// The suburb token of a comma-delimited address, or `"Unknown"` when the
/// address has no second segment.
#[must_use]
pub fn suburb_from_address(address: &str) -> String {
    address
        .split(',')
        .nth(1)
        .map_or_else(|| "Unknown".to_owned(), |s| s.trim().to_owned())
}

fn leading_integer(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postcode_range_boundaries() {
        let cases = [
            ("200", AuState::Act),
            ("299", AuState::Act),
            ("300", AuState::Unknown),
            ("800", AuState::Nt),
            ("999", AuState::Nt),
            ("1000", AuState::Nsw),
            ("2999", AuState::Nsw),
            ("3000", AuState::Vic),
            ("4000", AuState::Qld),
            ("5000", AuState::Sa),
            ("6999", AuState::Wa),
            ("7000", AuState::Tas),
            ("7999", AuState::Tas),
            ("8000", AuState::Unknown),
        ];
        for (code, expected) in cases {
            assert_eq!(state_from_postcode(Some(code)), expected, "postcode {code}");
        }
    }

    #[test]
    fn leading_zero_postcodes_parse_as_integers() {
        assert_eq!(state_from_postcode(Some("0800")), AuState::Nt);
        assert_eq!(state_from_postcode(Some("0200")), AuState::Act);
    }

    #[test]
    fn unparsable_or_absent_postcode_is_unknown() {
        assert_eq!(state_from_postcode(None), AuState::Unknown);
        assert_eq!(state_from_postcode(Some("")), AuState::Unknown);
        assert_eq!(state_from_postcode(Some("TAS")), AuState::Unknown);
        assert_eq!(state_from_postcode(Some("-7000")), AuState::Unknown);
    }

    #[test]
    fn postcode_with_trailing_garbage_uses_leading_digits() {
        assert_eq!(state_from_postcode(Some(" 7000 ")), AuState::Tas);
        assert_eq!(state_from_postcode(Some("3000a")), AuState::Vic);
    }

    #[test]
    fn huge_postcode_does_not_panic() {
        assert_eq!(
            state_from_postcode(Some("99999999999999999999")),
            AuState::Unknown
        );
    }

    #[test]
    fn address_suburb_segment_picks_state() {
        assert_eq!(
            state_from_address("2 Swan Street,North Hobart,7000"),
            AuState::Tas
        );
        assert_eq!(state_from_address("1 Main Rd, Newcastle West, 2302"), AuState::Nsw);
        assert_eq!(state_from_address("9 Bay St, Geelong, 3220"), AuState::Vic);
    }

    #[test]
    fn address_without_known_city_is_unknown() {
        assert_eq!(state_from_address("1 Main Rd, Ballarat, 3350"), AuState::Unknown);
        assert_eq!(state_from_address("no commas here"), AuState::Unknown);
        assert_eq!(state_from_address(""), AuState::Unknown);
    }

    #[test]
    fn only_the_second_segment_is_considered() {
        assert_eq!(state_from_address("Hobart St, Ballarat, 3350"), AuState::Unknown);
    }

    #[test]
    fn suburb_is_second_segment_trimmed() {
        assert_eq!(suburb_from_address("2 Swan Street, North Hobart ,7000"), "North Hobart");
        assert_eq!(suburb_from_address("just a street"), "Unknown");
        assert_eq!(suburb_from_address(""), "Unknown");
    }
}
