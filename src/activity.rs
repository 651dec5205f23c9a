//! Relative-time formatting for the recent-activity feed.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp as written by SQLite's
/// `datetime('now', 'localtime')`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM:SS` time.
pub fn parse_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    parse_timestamp(&format!("{date} {time}"))
}

/// Midnight of a `YYYY-MM-DD` date.
pub fn parse_date(date: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Humanize the distance between two timestamps: "just now", "5 minutes
/// ago", "in 2 days". Scheduled appointments can sit in the future.
pub fn relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = now.signed_duration_since(then);
    let secs = delta.num_seconds();
    if (-60..60).contains(&secs) {
        return "just now".to_string();
    }
    let (magnitude, past) = if secs > 0 {
        (delta, true)
    } else {
        (-delta, false)
    };

    let (count, unit) = if magnitude.num_minutes() < 60 {
        (magnitude.num_minutes(), "minute")
    } else if magnitude.num_hours() < 24 {
        (magnitude.num_hours(), "hour")
    } else if magnitude.num_days() < 30 {
        (magnitude.num_days(), "day")
    } else if magnitude.num_days() < 365 {
        (magnitude.num_days() / 30, "month")
    } else {
        (magnitude.num_days() / 365, "year")
    };

    let plural = if count == 1 { "" } else { "s" };
    if past {
        format!("{count} {unit}{plural} ago")
    } else {
        format!("in {count} {unit}{plural}")
    }
}
