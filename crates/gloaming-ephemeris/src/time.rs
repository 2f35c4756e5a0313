use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};

pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Julian day number of the Unix epoch.
const JULIAN_UNIX_EPOCH: f64 = 2_440_588.0;

/// Julian day number of J2000.0.
const JULIAN_J2000: f64 = 2_451_545.0;

/// Fractional days since J2000.0 (noon, 2000-01-01 UTC).
pub fn days_since_j2000(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / MS_PER_DAY - 0.5 + JULIAN_UNIX_EPOCH - JULIAN_J2000
}

/// Local wall-clock hour in [0, 24), including minutes and seconds.
pub fn local_hour<Tz: TimeZone>(at: &DateTime<Tz>) -> f64 {
    at.hour() as f64 + at.minute() as f64 / 60.0 + at.second() as f64 / 3600.0
}

/// Build a local timestamp from Unix milliseconds and an offset east of UTC.
/// Returns None when the offset or instant is outside chrono's range.
pub fn local_from_unix_millis(unix_ms: i64, offset_east_secs: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_east_secs)?;
    DateTime::from_timestamp_millis(unix_ms).map(|utc| utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_epoch_is_day_zero() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!(days_since_j2000(noon).abs() < 1e-9);
        let next = Utc.with_ymd_and_hms(2000, 1, 2, 12, 0, 0).unwrap();
        assert!((days_since_j2000(next) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_local_hour_uses_offset() {
        // 06:30 UTC is 12:00 in India (+05:30)
        let at = local_from_unix_millis(
            Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap().timestamp_millis(),
            5 * 3600 + 1800,
        )
        .expect("valid offset");
        assert!((local_hour(&at) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_local_hour_fractional() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let at = offset.with_ymd_and_hms(2024, 1, 1, 18, 45, 36).unwrap();
        assert!((local_hour(&at) - 18.76).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_offset_rejected() {
        assert!(local_from_unix_millis(0, 86_400).is_none());
    }
}
