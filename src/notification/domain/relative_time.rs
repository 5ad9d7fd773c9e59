//! Humanized elapsed-time strings such as `3 hours, 12 minutes`.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

const UNITS: [(i64, &str, &str); 6] = [
    (YEAR, "year", "years"),
    (MONTH, "month", "months"),
    (WEEK, "week", "weeks"),
    (DAY, "day", "days"),
    (HOUR, "hour", "hours"),
    (MINUTE, "minute", "minutes"),
];

/// Describes the time between `earlier` and `now` in at most two adjacent
/// units.
///
/// The second unit is only shown when it directly follows the first and is
/// non-zero. Less than a minute, or a timestamp in the future, reads as
/// `0 minutes`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use tasktrack::notification::domain::humanize_elapsed;
///
/// let now = Utc::now();
/// let earlier = now - Duration::minutes(62);
/// assert_eq!(humanize_elapsed(earlier, now), "1 hour, 2 minutes");
/// ```
#[must_use]
pub fn humanize_elapsed(earlier: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mut remaining = now.signed_duration_since(earlier).num_seconds();
    if remaining < MINUTE {
        return format_unit(0, "minute", "minutes");
    }

    let mut parts = Vec::with_capacity(2);
    for (seconds, singular, plural) in UNITS {
        let count = remaining.checked_div(seconds).unwrap_or(0);
        if !parts.is_empty() {
            if count > 0 {
                parts.push(format_unit(count, singular, plural));
            }
            break;
        }
        if count > 0 {
            parts.push(format_unit(count, singular, plural));
            remaining = remaining.checked_rem(seconds).unwrap_or(0);
        }
    }
    parts.join(", ")
}

fn format_unit(count: i64, singular: &str, plural: &str) -> String {
    let unit = if count == 1 { singular } else { plural };
    format!("{count} {unit}")
}
