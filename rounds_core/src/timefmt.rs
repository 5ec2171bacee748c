//! Timestamp formatting for history and feed views.
//!
//! The relative "time ago" buckets are load-bearing: other components test
//! against their exact output strings, so the bucket cutoffs
//! (60s / 60m / 24h / 30d) and the singular/plural forms stay fixed.
//! The reference time is always passed in.

use chrono::{DateTime, Utc};

/// Clock time of a drink, e.g. "22:45"
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

/// Calendar date of a drink, e.g. "Jun 14, 2025"
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

/// Relative age of a timestamp, e.g. "5 minutes ago"
///
/// A timestamp at or after `now` reports "0 seconds ago".
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    if seconds < 60 {
        return format!("{} seconds ago", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} {} ago", minutes, plural(minutes, "minute", "minutes"));
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} {} ago", hours, plural(hours, "hour", "hours"));
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{} {} ago", days, plural(days, "day", "days"));
    }

    let months = days / 30;
    format!("{} {} ago", months, plural(months, "month", "months"))
}

fn plural<'a>(n: i64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
