use chrono::{DateTime, NaiveDate, Utc};

/// Milliseconds in one hour; window size for trade-cursor discovery.
pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// Convert a UTC datetime to the millisecond epoch the venue understands.
pub fn datetime_to_ms(datetime: DateTime<Utc>) -> i64 {
    datetime.timestamp_millis()
}

/// Convert a UTC calendar date (midnight) to a millisecond epoch.
pub fn date_to_ms(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_conversion_matches_known_epoch() {
        let dt = Utc.with_ymd_and_hms(2017, 7, 14, 2, 40, 0).unwrap();
        assert_eq!(datetime_to_ms(dt), 1_500_000_000_000);
    }

    #[test]
    fn date_conversion_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        assert_eq!(date_to_ms(date), 1_483_228_800_000);
    }
}
