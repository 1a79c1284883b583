use std::sync::LazyLock;

use regex::Regex;

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2}):(\d{2})\s*(am|pm)\s*$").expect("valid regex")
});

/// Converts a 12-hour clock time such as `"9:30 am"` to `"HH:MM"`.
///
/// `12:xx am` becomes `00:xx` and `h:xx pm` becomes `h+12:xx` for `h != 12`.
/// Returns `None` for anything that is not a well-formed 12-hour time.
#[must_use]
pub fn to_24_hour(time: &str) -> Option<String> {
    let caps = CLOCK_RE.captures(time)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minutes = &caps[2];
    if !(1..=12).contains(&hour) || minutes.parse::<u32>().ok()? > 59 {
        return None;
    }

    let pm = caps[3].eq_ignore_ascii_case("pm");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some(format!("{hour:02}:{minutes}"))
}
