use std::borrow::Cow;

pub const REGULAR: &str = "Regular";

const STUDY_DAY_CODES: [(&str, &str); 3] = [
    ("smw", "Saturday, Monday, Wednesday"),
    ("stt", "Saturday, Tuesday, Thursday"),
    ("regular", REGULAR),
];

const WEEK_ORDER: [&str; 7] = [
    "Saturday",
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
];

/// Expands a study-day code into its weekday list. Unknown codes are returned as-is.
pub fn expand(code: &str) -> Cow<'_, str> {
    let lowered = code.trim().to_lowercase();
    STUDY_DAY_CODES
        .iter()
        .find(|(c, _)| *c == lowered)
        .map(|(_, display)| Cow::Borrowed(*display))
        .unwrap_or(Cow::Borrowed(code))
}

/// Position of a weekday in the Saturday-first coaching week.
pub fn weekday_rank(day: &str) -> Option<usize> {
    let day = day.trim();
    WEEK_ORDER.iter().position(|d| d.eq_ignore_ascii_case(day))
}

/// Sort key for an expanded study-day string: "Regular" after everything,
/// otherwise by the first listed weekday. Unrecognised first days rank as Saturday.
pub fn sort_key(display: &str) -> (bool, usize) {
    if display.trim().eq_ignore_ascii_case(REGULAR) {
        return (true, 0);
    }
    let first = display.split(',').next().unwrap_or_default();
    (false, weekday_rank(first).unwrap_or(0))
}
