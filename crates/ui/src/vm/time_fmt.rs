use chrono::{DateTime, NaiveDate, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

/// Weekday abbreviation for activity bars.
#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// `42s`, `3m 05s` or `1h 02m`.
#[must_use]
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn formats_fixed_timestamp() {
        assert_eq!(format_datetime(fixed_now()), "2023-11-14 22:13");
        assert_eq!(format_day(fixed_now().date_naive()), "Tue");
    }

    #[test]
    fn durations_pick_largest_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(185), "3m 05s");
        assert_eq!(format_duration(3720), "1h 02m");
    }
}
