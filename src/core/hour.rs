use chrono::{DateTime, DurationRound, Local, TimeDelta};

/// Truncate the timestamp to the start of its local hour.
///
/// Every series is keyed by these truncated timestamps, so points from different sources
/// meet on the same key.
#[must_use]
pub fn truncate_to_hour(time: DateTime<Local>) -> DateTime<Local> {
    time.duration_trunc(TimeDelta::hours(1)).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn truncates_minutes_and_seconds() {
        let time = Local.with_ymd_and_hms(2025, 6, 1, 14, 37, 12).unwrap();
        let hour = truncate_to_hour(time);
        assert_eq!(hour.hour(), 14);
        assert_eq!(hour.minute(), 0);
        assert_eq!(hour.second(), 0);
    }

    #[test]
    fn keeps_aligned_hour() {
        let time = Local.with_ymd_and_hms(2025, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(truncate_to_hour(time), time);
    }
}
