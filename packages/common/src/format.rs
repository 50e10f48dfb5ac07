//! Fixed string formats used when projecting rows into view records.

use chrono::{DateTime, NaiveDate, Utc};

/// Calendar dates render as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamps render as RFC 3339 in UTC with second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(format_date)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn format_optional_timestamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(format_timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_are_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2019, 9, 1).unwrap();
        assert_eq!(format_date(d), "2019-09-01");
        assert_eq!(format_optional_date(None), None);
    }

    #[test]
    fn timestamps_drop_subsecond_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(678);
        assert_eq!(format_timestamp(ts), "2024-01-02T03:04:05Z");
    }
}
