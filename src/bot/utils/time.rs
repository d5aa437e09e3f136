use chrono::{DateTime, Utc};
use chrono_tz::Tz;

// Date shown to the user and written to the ledger, e.g. 16.10.2026
pub fn format_date(now: DateTime<Utc>, time_zone: Tz) -> String {
    now.with_timezone(&time_zone).format("%d.%m.%Y").to_string()
}

// Timestamp column of the ledger. ISO order parses as a datetime in any sheet locale.
pub fn format_timestamp(now: DateTime<Utc>, time_zone: Tz) -> String {
    now.with_timezone(&time_zone)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

// Timestamp embedded in synthesized attachment names
pub fn format_file_timestamp(now: DateTime<Utc>, time_zone: Tz) -> String {
    now.with_timezone(&time_zone)
        .format("%m-%d-%YT%H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn late_evening() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 5).unwrap()
    }

    #[test]
    fn test_format_date_uses_time_zone() {
        assert_eq!(format_date(late_evening(), Tz::UTC), "09.03.2024");
        // Already the next day in Berlin
        assert_eq!(format_date(late_evening(), chrono_tz::Europe::Berlin), "10.03.2024");
    }

    #[test]
    fn test_format_timestamps() {
        assert_eq!(format_timestamp(late_evening(), Tz::UTC), "2024-03-09 23:30:05");
        assert_eq!(
            format_file_timestamp(late_evening(), chrono_tz::Europe::Berlin),
            "03-10-2024T00:30:05"
        );
    }
}
